use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use cursorpage_core::{
    build_cursor_query, decode_cursor, encode_cursor, json_to_value, value_to_json,
    CompareOp, CursorPageConfig, Filter, FilterParser, PagePlanner, PageRequest, Value,
};
use serde_json::Value as JsonValue;
use std::path::Path;

#[derive(Args)]
pub struct QueryArgs {
    /// Paginated field
    #[arg(short, long, default_value = "_id")]
    pub field: String,

    /// Comparison operator ($gt, $gte, $lt, $lte)
    #[arg(short, long, default_value = "$gt")]
    pub op: String,

    /// Break ties on _id; expects [primary, id] values
    #[arg(short, long)]
    pub secondary: bool,

    /// Cursor values as JSON (bare words are strings)
    pub values: Vec<String>,
}

#[derive(Args)]
pub struct PlanArgs {
    /// Paginated field; defaults to _id
    #[arg(short, long, default_value = "")]
    pub field: String,

    /// Sort descending
    #[arg(long)]
    pub desc: bool,

    /// Page size; 0 uses the configured default
    #[arg(short, long, default_value_t = 0)]
    pub limit: u64,

    /// Token of the last item of the previous page
    #[arg(long, conflicts_with = "previous")]
    pub next: Option<String>,

    /// Token of the first item of the next page
    #[arg(long)]
    pub previous: Option<String>,

    /// Base filter as native JSON
    #[arg(long)]
    pub filter: Option<String>,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show,
    /// Write the effective configuration to the config path
    Init,
}

pub fn execute_query_command(args: QueryArgs) -> Result<()> {
    let op: CompareOp = args.op.parse()?;
    let values = parse_values(&args.values)?;
    let filter = build_cursor_query(args.secondary, &args.field, op, &values)?;
    print_json(&serde_json::to_value(&filter)?)
}

pub fn execute_plan_command(config: &CursorPageConfig, args: PlanArgs) -> Result<()> {
    let base = match &args.filter {
        Some(json) => FilterParser::parse(json).context("Invalid base filter")?,
        None => Filter::Empty,
    };

    let request = PageRequest {
        filter: base,
        paginated_field: args.field,
        sort_ascending: !args.desc,
        limit: args.limit,
        next: args.next,
        previous: args.previous,
    };

    let planner = PagePlanner::new(config.pagination.clone());
    let query = planner.plan(&request)?;
    print_json(&serde_json::to_value(&query)?)
}

pub fn execute_encode_command(values: &[String]) -> Result<()> {
    let values = parse_values(values)?;
    println!("{}", encode_cursor(&values));
    Ok(())
}

pub fn execute_decode_command(token: &str) -> Result<()> {
    let values = decode_cursor(token)?;
    print_json(&JsonValue::Array(values.iter().map(value_to_json).collect()))
}

pub fn execute_config_command(
    path: &Path,
    config: &CursorPageConfig,
    action: ConfigCommands,
) -> Result<()> {
    match action {
        ConfigCommands::Show => print_json(&serde_json::to_value(config)?),
        ConfigCommands::Init => {
            config.save(path)?;
            println!("Wrote {}", path.display());
            Ok(())
        }
    }
}

/// Parse command-line values as extended JSON; anything that is not JSON is
/// taken as a plain string
fn parse_values(raw: &[String]) -> Result<Vec<Value>> {
    raw.iter()
        .map(|text| match serde_json::from_str::<JsonValue>(text) {
            Ok(json) => json_to_value(&json)
                .with_context(|| format!("Invalid cursor value: {}", text)),
            Err(_) => Ok(Value::String(text.clone())),
        })
        .collect()
}

fn print_json(value: &JsonValue) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_values() {
        let raw = vec![
            "test item".to_string(),
            "42".to_string(),
            r#""quoted""#.to_string(),
            r#"{"$oid": "0102030405060708090a0b0c"}"#.to_string(),
        ];
        let values = parse_values(&raw).unwrap();
        assert_eq!(values[0], Value::from("test item"));
        assert_eq!(values[1], Value::Int32(42));
        assert_eq!(values[2], Value::from("quoted"));
        assert_eq!(
            values[3],
            Value::ObjectId("0102030405060708090a0b0c".parse().unwrap())
        );

        assert!(parse_values(&[r#"{"$oid": "zz"}"#.to_string()]).is_err());
    }
}
