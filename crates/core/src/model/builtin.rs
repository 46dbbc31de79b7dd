use super::bank::QuestionBank;
use super::key::{BucketKey, Difficulty, Topic};
use super::question::Question;

fn q(id: u32, prompt: &str, options: [&str; 4], answer: &str, explanation: &str) -> Question {
    Question::from_parts(
        id,
        prompt,
        options.iter().map(|o| (*o).to_owned()).collect(),
        answer,
        explanation,
    )
}

fn bucket(topic: &Topic, difficulty: Difficulty) -> BucketKey {
    BucketKey::topical(topic.clone(), difficulty)
}

impl QuestionBank {
    /// The default question table shipped with the app.
    #[must_use]
    pub fn builtin() -> Self {
        let nodejs = Topic::known("nodejs");
        let laravel = Topic::known("laravel");

        QuestionBank::new()
            .with_bucket(
                bucket(&nodejs, Difficulty::Easy),
                vec![
                    q(
                        1,
                        "Which command is used to install packages from a `package.json` file?",
                        ["npm start", "npm install", "npm run", "npm get"],
                        "npm install",
                        "The `npm install` command is used to install all dependencies listed in your `package.json` file.",
                    ),
                    q(
                        2,
                        "What is the purpose of the `require()` function in Node.js?",
                        [
                            "To define a new function",
                            "To import modules",
                            "To declare a variable",
                            "To run a script",
                        ],
                        "To import modules",
                        "The `require()` function is used to import and use modules (both built-in and external) in a Node.js application.",
                    ),
                    q(
                        3,
                        "What is Node.js built on?",
                        [
                            "Java Virtual Machine",
                            "Python Interpreter",
                            "Google Chrome's V8 Engine",
                            "Apache Server",
                        ],
                        "Google Chrome's V8 Engine",
                        "Node.js is a JavaScript runtime built on the V8 engine, which compiles JavaScript code to machine code for fast execution.",
                    ),
                ],
            )
            .with_bucket(
                bucket(&nodejs, Difficulty::Medium),
                vec![
                    q(
                        4,
                        "What is a 'stream' in Node.js?",
                        [
                            "A data pipe for continuous data flow",
                            "A type of database",
                            "A module for creating animations",
                            "A network connection protocol",
                        ],
                        "A data pipe for continuous data flow",
                        "Streams let you read or write data sequentially in chunks rather than all at once.",
                    ),
                    q(
                        5,
                        "What is a 'middleware' in Express.js?",
                        [
                            "A function that only handles errors",
                            "A function that is executed before a route handler",
                            "A tool for creating a database schema",
                            "A class for managing user sessions",
                        ],
                        "A function that is executed before a route handler",
                        "Middleware sees the request and response objects and runs tasks such as authentication or logging before the route handler.",
                    ),
                ],
            )
            .with_bucket(
                bucket(&nodejs, Difficulty::Hard),
                vec![
                    q(
                        6,
                        "What is the Reactor Pattern in Node.js?",
                        [
                            "A design pattern for creating web servers",
                            "A pattern for managing asynchronous I/O with an event loop",
                            "A method for handling database connections",
                            "A framework for building APIs",
                        ],
                        "A pattern for managing asynchronous I/O with an event loop",
                        "The Reactor Pattern dispatches incoming requests to handlers from a single event loop.",
                    ),
                    q(
                        7,
                        "What is the purpose of `EventEmitter`?",
                        [
                            "To handle network requests",
                            "To read and write files",
                            "To manage and emit events with listeners",
                            "To manage sessions",
                        ],
                        "To manage and emit events with listeners",
                        "`EventEmitter` lets objects emit named events that invoke the listeners attached to them.",
                    ),
                ],
            )
            .with_bucket(
                bucket(&laravel, Difficulty::Easy),
                vec![
                    q(
                        1,
                        "Which language is Laravel built on?",
                        ["React", "PHP", "Express", "Django"],
                        "PHP",
                        "Laravel is a popular open-source PHP web framework.",
                    ),
                    q(
                        2,
                        "What is the command to create a new Laravel project?",
                        [
                            "`laravel new app-name`",
                            "`create-laravel app-name`",
                            "`composer create-project laravel/laravel app-name`",
                            "`npm new app-name`",
                        ],
                        "`composer create-project laravel/laravel app-name`",
                        "Composer, the PHP dependency manager, creates new Laravel projects.",
                    ),
                ],
            )
            .with_bucket(
                bucket(&laravel, Difficulty::Medium),
                vec![
                    q(
                        3,
                        "What is Eloquent in Laravel?",
                        [
                            "A database migration tool",
                            "A templating engine",
                            "An ORM (Object-Relational Mapper)",
                            "A command-line interface",
                        ],
                        "An ORM (Object-Relational Mapper)",
                        "Eloquent is Laravel's ORM for working with the database through objects.",
                    ),
                    q(
                        4,
                        "What command runs all database migrations?",
                        [
                            "`php artisan migrate`",
                            "`php artisan db:migrate`",
                            "`php artisan run:migrations`",
                            "`php artisan schema:run`",
                        ],
                        "`php artisan migrate`",
                        "`php artisan migrate` runs all pending migrations.",
                    ),
                ],
            )
            .with_bucket(
                bucket(&laravel, Difficulty::Hard),
                vec![q(
                    5,
                    "How do you define a one-to-many relationship in Eloquent?",
                    [
                        "`hasMany` and `belongsTo`",
                        "`hasOne` and `hasMany`",
                        "`belongsToMany` and `hasOne`",
                        "`hasOne` and `belongsTo`",
                    ],
                    "`hasMany` and `belongsTo`",
                    "The parent side uses `hasMany` and the child side uses `belongsTo`.",
                )],
            )
    }
}
