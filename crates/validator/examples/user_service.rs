//! User service example for warden-validator
//!
//! Loads users from JSON, appends them through a gated operation and shows
//! how blocked operations, raising rules and chains surface to the caller.
//!
//! Run with `RUST_LOG=debug` to see every rule evaluation.

use std::any::{Any, TypeId};

use parking_lot::Mutex;
use serde::Deserialize;
use tracing_subscriber::EnvFilter;
use warden_validator::prelude::*;

const USERS: &str = r#"[
    {"id": 1, "name": "alice", "email": "alice@example.com", "age": 31},
    {"id": 2, "name": "TOTO", "email": "toto@example.com", "age": 22},
    {"id": 3, "name": "XXX", "email": "xxx@example.com", "age": 40},
    {"id": 4, "name": "dave", "email": "dave@example.com"}
]"#;

#[derive(Debug, Clone, Deserialize)]
struct User {
    id: u64,
    name: String,
    #[allow(dead_code)]
    email: String,
    age: Option<u32>,
}

struct UserValidator;

impl UserValidator {
    fn check_email(&self, user: &User) -> Outcome {
        if user.name == "TOTO" {
            return Err(ValidatorError::raised(format!("name is invalid: {}", user.name)));
        }
        Ok(ValidatorResult::ok())
    }

    fn check_name(&self, user: &User) -> Outcome {
        if user.name == "XXX" {
            return ValidatorResult::error(format!("name is invalid R002: {}", user.name));
        }
        Ok(ValidatorResult::ok())
    }
}

impl Validate for UserValidator {
    type Input = User;

    fn validate(&self, user: &User) -> Outcome {
        match user.age {
            Some(age) if age >= 18 => Ok(ValidatorResult::ok()),
            _ => ValidatorResult::error("user must be at least 18"),
        }
    }
}

impl Registered for UserValidator {
    fn register_rules(rules: &mut Registrar<Self>) {
        rules
            .register(["R001", "R003"], "check_email", Self::check_email)
            .register(["R002"], "check_name", Self::check_name);
    }
}

struct UserService {
    validator: UserValidator,
    users: Mutex<Vec<User>>,
}

impl UserService {
    fn store(&self, user: User) {
        self.users.lock().push(user);
    }
}

impl Adapter for UserService {
    fn adapt_any(&self, capability: TypeId) -> Option<&(dyn Any + 'static)> {
        self.adapt_validator(capability)
    }
}

impl Service for UserService {
    type Validator = UserValidator;

    fn validator(&self) -> &UserValidator {
        &self.validator
    }
}

fn user_arg(user: &User) -> &User {
    user
}

fn report<R>(what: &str, outcome: Result<Gated<R>, ValidatorError>) {
    match outcome {
        Ok(Gated::Passed(_)) => println!("{what}: done"),
        Ok(Gated::Blocked(result)) => println!("{what}: blocked by {result}"),
        Err(err) => println!("{what}: {err}"),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let service = UserService {
        validator: UserValidator,
        users: Mutex::new(Vec::new()),
    };

    let append = gate::<UserValidator>(RuleSelection::All)
        .subject(user_arg)
        .guard(|service: &UserService, user: User| service.store(user));
    let bidon = gate::<UserValidator>(["R002"])
        .subject(user_arg)
        .guard(|_: &UserService, user: User| user.id);

    println!("=== Appending users ===");
    let users: Vec<User> = serde_json::from_str(USERS)?;
    for user in users {
        let label = format!("append #{} {}", user.id, user.name);
        report(&label, append.call(&service, user));
    }
    println!("stored: {}", service.users.lock().len());

    println!("\n=== Validator check ===");
    let toto = User {
        id: 5,
        name: "TOTO".into(),
        email: "test@example.com".into(),
        age: Some(19),
    };
    println!("validate: {}", service.validator().validate(&toto)?);

    println!("\n=== Single rule ===");
    report("bidon XXX", bidon.call(&service, User { name: "XXX".into(), ..toto.clone() }));
    match service.validator().accept(&["R001"].into(), Mode::All, &toto) {
        Ok(result) => println!("R001: {result}"),
        Err(err) => println!("R001: {err}"),
    }

    println!("\n=== Chain ===");
    let chain = ChainBuilder::<i32>::new()
        .check(|n| *n != 0, "value is zero")
        .check(|n| *n > 0, "value<0")
        .check(|n| *n < 10, "error: value>10")
        .build()?;
    println!("chain(15): {}", chain.validate(&15)?);
    println!("chain(5): {}", chain.validate(&5)?);

    Ok(())
}
