//! Prints the wire arguments and headers for a query given as JSON.
//!
//! Usage: `inspect_query '{"limit": 10, "orderBy": ["id.desc"]}' [name=value ...]`
//!
//! Each trailing `name=value` pair adds an equality predicate.

use collection_sync::{Field, Query, QueryConfig};

fn main() {
    let mut args = std::env::args().skip(1);
    let config_json = args.next().unwrap_or_else(|| "{}".to_string());

    let config: QueryConfig = match serde_json::from_str(&config_json) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("invalid query config: {}", err);
            std::process::exit(1);
        }
    };

    let mut query = Query::from(config);
    for pair in args {
        match pair.split_once('=') {
            Some((name, value)) => query = query.filter(Field::plain(name).equals(value)),
            None => eprintln!("skipping {:?}: expected name=value", pair),
        }
    }

    println!("=== Arguments ({}) ===", query.url_arguments().len());
    for arg in query.url_arguments() {
        println!("  {}={}", arg.argument, arg.value);
    }

    println!("\n=== Headers ===");
    let headers = query.request_headers();
    if headers.is_empty() {
        println!("  (none)");
    }
    for header in headers {
        println!("  {}", header);
    }
}
