use std::{error::Error, fs::File, io::Read, io::Write};

use serde::{de::DeserializeOwned, Serialize};

pub fn read_json<T: DeserializeOwned>(path: &str) -> Result<T, Box<dyn Error>> {
    let mut file = File::open(path)?;
    let mut content = String::new();
    file.read_to_string(&mut content)?;
    let result: T = serde_json::from_str(&content)?;

    Ok(result)
}

pub fn write_json<T: Serialize>(path: &str, data: &T) -> Result<(), Box<dyn Error>> {
    let serialized = serde_json::to_string_pretty(data)?;
    let mut file = File::create(path)?;
    file.write_all(serialized.as_bytes())?;

    Ok(())
}
