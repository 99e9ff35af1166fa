use crate::commands::Outcome;
use crate::error::Result;
use crate::platform::platform_string;
use crate::version;

pub fn execute() -> Result<Outcome> {
    println!("{}", version::long_version());
    println!("Platform: {}", platform_string());
    Ok(Outcome::Success)
}
