use std::collections::BTreeMap;
use std::io::{self, Write};

use serde::Serialize;
use terrors::OneOf;

use crate::error::{IoError, MissingKey, Usage};
use crate::store::ConfigStore;
use crate::{Error, file};

const USAGE: &str = "\
usage: autumn-props get <key> [default]
       autumn-props dump
       autumn-props read <file> [key]
       autumn-props write <file> <key> <value>";

pub fn run_cli(args: &[String]) -> Result<(), Error> {
    let args: Vec<&str> = args.iter().map(String::as_str).collect();

    match args.as_slice() {
        // Lookups against the bundled autumn.properties
        ["get", key] => {
            let value = ConfigStore::global()
                .get(key)
                .ok_or_else(|| -> Error { OneOf::new(MissingKey(key.trim().to_string())) })?;
            println!("{value}");
        }
        ["get", key, default] => println!("{}", ConfigStore::global().get_or(key, default)),
        ["dump"] => print_json(ConfigStore::global().properties()).map_err(OneOf::broaden)?,

        // Operations on arbitrary files
        ["read", path] => {
            let map: BTreeMap<String, String> = file::read_map(*path).map_err(OneOf::broaden)?.into_iter().collect();
            print_json(&map).map_err(OneOf::broaden)?;
        }
        ["read", path, key] => {
            let value = file::read_value(*path, key).map_err(OneOf::broaden)?;
            println!("{value}");
        }
        ["write", path, key, value] => file::write_value(*path, key, value).map_err(OneOf::broaden)?,

        _ => return Err(OneOf::new(Usage(USAGE.to_string()))),
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), OneOf<(IoError,)>> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)
        .map_err(io::Error::from)
        .and_then(|()| writeln!(stdout))
        .map_err(|e| OneOf::new(IoError(e)))
}
