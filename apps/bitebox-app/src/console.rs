//! # Console Driver
//!
//! A line-oriented front end over the command layer. One command per input
//! line, one JSON document per output line.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  stdin                       Session                     stdout         │
//! │  ─────                       ───────                     ──────         │
//! │  "add 104 2" ──► ConsoleCommand::Add ──► add_to_cart ──► {"lines":...}  │
//! │  "add 999"   ──► ConsoleCommand::Add ──► NOT_FOUND   ──► {"error":...}  │
//! │  "frobnicate" ─► UNKNOWN_COMMAND ──────────────────────► {"error":...}  │
//! │  "# comment"  ─► skipped                                                │
//! │  "quit"       ─► loop ends                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Logs go to stderr, so stdout stays machine-readable.

use std::str::FromStr;

use serde_json::{json, Value};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info};

use bitebox_core::catalog::{SearchQuery, SortBy};
use bitebox_core::{CheckoutForm, PaymentMethod};

use crate::commands::{cart, catalog, checkout, config, orders};
use crate::error::ApiError;
use crate::state::Session;

const HELP: &[&str] = &[
    "categories",
    "restaurants [category_id]",
    "featured",
    "search [text] [sort=relevance|rating|delivery] [within=<minutes>]",
    "menu <restaurant_id>",
    "cart",
    "add <item_id> [quantity]",
    "inc <item_id>",
    "dec <item_id>",
    "remove <item_id>",
    "clear",
    "summary",
    "checkout <address>|<phone>[|card|cash]",
    "orders",
    "track <order_id>",
    "advance <order_id>",
    "config",
    "help",
    "quit",
];

/// A parsed console line.
#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleCommand {
    Help,
    Categories,
    Restaurants { category_id: Option<String> },
    Featured,
    Search(SearchQuery),
    Menu { restaurant_id: String },
    Cart,
    Add { item_id: String, quantity: Option<u32> },
    Increment { item_id: String },
    Decrement { item_id: String },
    Remove { item_id: String },
    Clear,
    Summary,
    Checkout(CheckoutForm),
    Orders,
    Track { order_id: String },
    Advance { order_id: String },
    Config,
    Quit,
}

fn required_arg(verb: &str, arg: Option<&str>, name: &str) -> Result<String, ApiError> {
    arg.map(str::to_string)
        .ok_or_else(|| ApiError::unknown_command(format!("usage: {} <{}>", verb, name)))
}

fn parse_search(rest: &str) -> Result<SearchQuery, ApiError> {
    let mut query = SearchQuery::default();
    let mut words = Vec::new();

    for token in rest.split_whitespace() {
        if let Some(sort) = token.strip_prefix("sort=") {
            query.sort = SortBy::from_str(sort).map_err(ApiError::validation)?;
        } else if let Some(minutes) = token.strip_prefix("within=") {
            let minutes = minutes
                .parse::<u32>()
                .map_err(|_| ApiError::validation("within must be a number of minutes"))?;
            query.max_delivery_minutes = Some(minutes);
        } else {
            words.push(token);
        }
    }

    query.text = words.join(" ");
    Ok(query)
}

fn parse_checkout(rest: &str) -> Result<CheckoutForm, ApiError> {
    let mut parts = rest.split('|').map(str::trim);
    let address = parts.next().unwrap_or_default();
    let phone = parts.next().unwrap_or_default();
    let payment_method = match parts.next() {
        Some(method) if !method.is_empty() => {
            PaymentMethod::from_str(method).map_err(ApiError::validation)?
        }
        _ => PaymentMethod::default(),
    };

    Ok(CheckoutForm::new(address, phone, payment_method))
}

impl FromStr for ConsoleCommand {
    type Err = ApiError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };
        let mut args = rest.split_whitespace();
        let first = args.next();

        let command = match verb.to_lowercase().as_str() {
            "help" | "?" => ConsoleCommand::Help,
            "categories" => ConsoleCommand::Categories,
            "restaurants" => ConsoleCommand::Restaurants {
                category_id: first.map(str::to_string),
            },
            "featured" => ConsoleCommand::Featured,
            "search" => ConsoleCommand::Search(parse_search(rest)?),
            "menu" => ConsoleCommand::Menu {
                restaurant_id: required_arg(verb, first, "restaurant_id")?,
            },
            "cart" => ConsoleCommand::Cart,
            "add" => {
                let item_id = required_arg(verb, first, "item_id")?;
                let quantity = args
                    .next()
                    .map(|q| {
                        q.parse::<u32>()
                            .map_err(|_| ApiError::validation("quantity must be a whole number"))
                    })
                    .transpose()?;
                ConsoleCommand::Add { item_id, quantity }
            }
            "inc" | "increment" => ConsoleCommand::Increment {
                item_id: required_arg(verb, first, "item_id")?,
            },
            "dec" | "decrement" => ConsoleCommand::Decrement {
                item_id: required_arg(verb, first, "item_id")?,
            },
            "remove" | "rm" => ConsoleCommand::Remove {
                item_id: required_arg(verb, first, "item_id")?,
            },
            "clear" => ConsoleCommand::Clear,
            "summary" => ConsoleCommand::Summary,
            "checkout" => ConsoleCommand::Checkout(parse_checkout(rest)?),
            "orders" => ConsoleCommand::Orders,
            "track" => ConsoleCommand::Track {
                order_id: required_arg(verb, first, "order_id")?,
            },
            "advance" => ConsoleCommand::Advance {
                order_id: required_arg(verb, first, "order_id")?,
            },
            "config" => ConsoleCommand::Config,
            "quit" | "exit" => ConsoleCommand::Quit,
            other => {
                return Err(ApiError::unknown_command(format!(
                    "unknown command '{}', try 'help'",
                    other
                )))
            }
        };

        Ok(command)
    }
}

/// Runs one command against the session and returns its JSON result.
pub fn dispatch(session: &Session, command: ConsoleCommand) -> Result<Value, ApiError> {
    let Session {
        cart: cart_state,
        catalog: catalog_state,
        orders: orders_state,
        config: config_state,
    } = session;

    let value = match command {
        ConsoleCommand::Help => json!({ "commands": HELP }),
        ConsoleCommand::Categories => serde_json::to_value(catalog::list_categories(catalog_state))?,
        ConsoleCommand::Restaurants { category_id } => serde_json::to_value(
            catalog::list_restaurants(catalog_state, category_id.as_deref()),
        )?,
        ConsoleCommand::Featured => {
            serde_json::to_value(catalog::featured_restaurants(catalog_state))?
        }
        ConsoleCommand::Search(query) => {
            serde_json::to_value(catalog::search_restaurants(catalog_state, query)?)?
        }
        ConsoleCommand::Menu { restaurant_id } => {
            serde_json::to_value(catalog::get_menu(catalog_state, &restaurant_id)?)?
        }
        ConsoleCommand::Cart => serde_json::to_value(cart::get_cart(cart_state, config_state))?,
        ConsoleCommand::Add { item_id, quantity } => serde_json::to_value(cart::add_to_cart(
            catalog_state,
            cart_state,
            config_state,
            &item_id,
            quantity,
        )?)?,
        ConsoleCommand::Increment { item_id } => serde_json::to_value(
            cart::increment_cart_item(cart_state, config_state, &item_id),
        )?,
        ConsoleCommand::Decrement { item_id } => serde_json::to_value(
            cart::decrement_cart_item(cart_state, config_state, &item_id),
        )?,
        ConsoleCommand::Remove { item_id } => serde_json::to_value(cart::remove_from_cart(
            cart_state,
            config_state,
            &item_id,
        ))?,
        ConsoleCommand::Clear => serde_json::to_value(cart::clear_cart(cart_state, config_state))?,
        ConsoleCommand::Summary => {
            serde_json::to_value(checkout::checkout_summary(cart_state, config_state))?
        }
        ConsoleCommand::Checkout(form) => serde_json::to_value(checkout::place_order(
            cart_state,
            orders_state,
            config_state,
            form,
        )?)?,
        ConsoleCommand::Orders => serde_json::to_value(orders::list_orders(orders_state))?,
        ConsoleCommand::Track { order_id } => {
            serde_json::to_value(orders::track_order(orders_state, &order_id)?)?
        }
        ConsoleCommand::Advance { order_id } => {
            serde_json::to_value(orders::advance_order(orders_state, &order_id)?)?
        }
        ConsoleCommand::Config => serde_json::to_value(config::get_config(config_state))?,
        ConsoleCommand::Quit => Value::Null,
    };

    Ok(value)
}

/// Reads commands until EOF or `quit`, writing one JSON line per command.
///
/// Failed commands produce `{"error": {...}}` and the loop carries on.
pub async fn run_console<R, W>(session: &Session, reader: R, mut writer: W) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        debug!(line = %line, "console input");

        let output = match line.parse::<ConsoleCommand>() {
            Ok(ConsoleCommand::Quit) => break,
            Ok(command) => dispatch(session, command).unwrap_or_else(|e| json!({ "error": e })),
            Err(e) => json!({ "error": e }),
        };

        writer.write_all(output.to_string().as_bytes()).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await?;
    }

    info!("console session ended");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    async fn run_script(session: &Session, script: &str) -> Vec<Value> {
        let mut out = Vec::new();
        run_console(session, script.as_bytes(), &mut out).await.unwrap();

        String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_parse_add() {
        assert_eq!(
            "add 104 2".parse::<ConsoleCommand>().unwrap(),
            ConsoleCommand::Add {
                item_id: "104".into(),
                quantity: Some(2)
            }
        );
        assert_eq!(
            "ADD 101".parse::<ConsoleCommand>().unwrap(),
            ConsoleCommand::Add {
                item_id: "101".into(),
                quantity: None
            }
        );

        let err = "add 101 lots".parse::<ConsoleCommand>().unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = "add".parse::<ConsoleCommand>().unwrap_err();
        assert_eq!(err.code, ErrorCode::UnknownCommand);
    }

    #[test]
    fn test_parse_search() {
        let command = "search burger palace sort=rating within=30"
            .parse::<ConsoleCommand>()
            .unwrap();

        assert_eq!(
            command,
            ConsoleCommand::Search(SearchQuery {
                text: "burger palace".into(),
                sort: SortBy::Rating,
                max_delivery_minutes: Some(30),
            })
        );

        assert!("search sort=spiciest".parse::<ConsoleCommand>().is_err());
    }

    #[test]
    fn test_parse_checkout() {
        let command = "checkout 1 Main St, Apt 4 | 555-0100 | cash"
            .parse::<ConsoleCommand>()
            .unwrap();
        assert_eq!(
            command,
            ConsoleCommand::Checkout(CheckoutForm::new(
                "1 Main St, Apt 4",
                "555-0100",
                PaymentMethod::Cash
            ))
        );

        let command = "checkout 1 Main St|555-0100".parse::<ConsoleCommand>().unwrap();
        assert_eq!(
            command,
            ConsoleCommand::Checkout(CheckoutForm::new("1 Main St", "555-0100", PaymentMethod::Card))
        );
    }

    #[test]
    fn test_unknown_command() {
        let err = "frobnicate".parse::<ConsoleCommand>().unwrap_err();
        assert_eq!(err.code, ErrorCode::UnknownCommand);
    }

    #[tokio::test]
    async fn test_script_to_checkout() {
        let session = Session::default();
        let script = "\
# build a cart
add 101
add 104 2
dec 104
inc 104

checkout 1 Main St|555-0100
cart
orders
";

        let out = run_script(&session, script).await;
        assert_eq!(out.len(), 7);

        assert_eq!(out[1]["totals"]["totalDisplay"], "$22.76");
        assert_eq!(out[2]["lines"][1]["quantity"], 1);
        assert_eq!(out[3]["lines"][1]["quantity"], 2);

        assert_eq!(out[4]["status"], "confirmed");
        assert_eq!(out[4]["breakdown"]["total"], 2276);
        assert_eq!(out[5]["totals"]["itemCount"], 0);
        assert_eq!(out[6].as_array().map(Vec::len), Some(1));
    }

    #[tokio::test]
    async fn test_errors_do_not_stop_the_loop() {
        let session = Session::default();
        let out = run_script(&session, "add 999\nfrobnicate\ncheckout |\ncart\n").await;

        assert_eq!(out.len(), 4);
        assert_eq!(out[0]["error"]["code"], "NOT_FOUND");
        assert_eq!(out[1]["error"]["code"], "UNKNOWN_COMMAND");
        assert_eq!(out[2]["error"]["code"], "VALIDATION_ERROR");
        assert!(out[3]["lines"].as_array().is_some());
    }

    #[tokio::test]
    async fn test_quit_stops_reading() {
        let session = Session::default();
        let out = run_script(&session, "add 101\nquit\nadd 101\n").await;

        assert_eq!(out.len(), 1);
        assert_eq!(session.cart.with_cart(|c| c.item_count()), 1);
    }

    #[tokio::test]
    async fn test_track_placed_order() {
        let session = Session::default();
        let out = run_script(&session, "add 301\ncheckout 1 Main St|555-0100\n").await;
        let order_id = out[1]["id"].as_str().unwrap().to_string();

        let out = run_script(&session, &format!("advance {id}\ntrack {id}\n", id = order_id)).await;
        assert_eq!(out[0]["order"]["status"], "preparing");
        assert_eq!(out[1]["steps"][1]["completed"], true);
        assert_eq!(out[1]["steps"][2]["completed"], false);
    }
}
