use bank_core_api::{ApiError, ApiResult};
use heapless::String as HeaplessString;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Anything that can present itself in one line
pub trait Introduce {
    fn introduction(&self) -> String;
}

/// Basic user; fields are only reachable through the accessors below.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    name: HeaplessString<100>,
    age: u32,
}

impl User {
    pub fn new(name: &str, age: u32) -> ApiResult<Self> {
        Ok(Self {
            name: parse_name(name)?,
            age: validate_age(age)?,
        })
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn set_name(&mut self, name: &str) -> ApiResult<()> {
        self.name = parse_name(name)?;
        Ok(())
    }

    /// Rejects zero and leaves the current age untouched on failure
    pub fn set_age(&mut self, age: u32) -> ApiResult<()> {
        self.age = validate_age(age)?;
        Ok(())
    }
}

impl Introduce for User {
    fn introduction(&self) -> String {
        format!("Hi, I'm {} and I'm {} years old.", self.name, self.age)
    }
}

fn parse_name(name: &str) -> ApiResult<HeaplessString<100>> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ApiError::ValidationError("Name cannot be empty".to_string()));
    }
    HeaplessString::from_str(name)
        .map_err(|_| ApiError::ValidationError("Name is too long (max 100 chars)".to_string()))
}

fn validate_age(age: u32) -> ApiResult<u32> {
    if age == 0 {
        return Err(ApiError::ValidationError("Age must be positive".to_string()));
    }
    Ok(age)
}
