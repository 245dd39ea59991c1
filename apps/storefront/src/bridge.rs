//! # Bridge
//!
//! Line-delimited JSON protocol between the web UI and the session.
//!
//! ## Protocol
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Bridge Loop                                          │
//! │                                                                         │
//! │  stdin  ── {"cmd":"buy","productId":"1"} ───────────────┐               │
//! │                                                         ▼               │
//! │                                              parse Request (serde)      │
//! │                                                         │               │
//! │                          ┌── malformed ─────────────────┤               │
//! │                          │                              ▼               │
//! │                          │                    dispatch → commands::*    │
//! │                          │                              │               │
//! │                          ▼                              ▼               │
//! │                    BAD_REQUEST              Ok(data) / Err(ApiError)    │
//! │                          │                              │               │
//! │                          └──────────────┬───────────────┘               │
//! │                                         ▼                               │
//! │                              + drained StoreEvents                      │
//! │                                         │                               │
//! │  stdout ◄── {"ok":true,"data":{...},"events":[{"title":...}]} ◄─┘       │
//! │                                                                         │
//! │  One response line per request line. EOF ends the session.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::io::{self, BufRead, Write};

use kashify_core::TransactionType;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::commands::{cart, checkout, config, product};
use crate::error::ApiError;
use crate::events::{Notification, StoreEvent};
use crate::state::Storefront;

/// One request line.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum Request {
    ListProducts {
        #[serde(default)]
        category: Option<String>,
        #[serde(default)]
        sort: Option<String>,
    },
    SetCategory {
        category: String,
    },
    SetSort {
        sort: String,
    },
    #[serde(rename_all = "camelCase")]
    GetProduct {
        product_id: String,
    },
    FilterOptions,
    GetCart,
    #[serde(rename_all = "camelCase")]
    AddToCart {
        product_id: String,
        #[serde(rename = "type", default)]
        kind: Option<TransactionType>,
    },
    #[serde(rename_all = "camelCase")]
    Buy {
        product_id: String,
    },
    #[serde(rename_all = "camelCase")]
    Rent {
        product_id: String,
    },
    #[serde(rename_all = "camelCase")]
    RemoveFromCart {
        product_id: String,
        #[serde(rename = "type")]
        kind: TransactionType,
    },
    #[serde(rename_all = "camelCase")]
    UpdateCartItem {
        product_id: String,
        #[serde(rename = "type")]
        kind: TransactionType,
        quantity: i64,
    },
    ClearCart,
    OpenCart,
    CloseCart,
    Checkout,
    #[serde(rename_all = "camelCase")]
    ToggleFavorite {
        product_id: String,
    },
    GetConfig,
}

/// One response line.
#[derive(Debug, Serialize)]
pub struct Response<'a> {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
    pub events: Vec<Notification<'a>>,
}

impl<'a> Response<'a> {
    fn new(result: Result<Value, ApiError>, events: &'a [StoreEvent]) -> Self {
        let events = events.iter().map(StoreEvent::notification).collect();
        match result {
            Ok(data) => Response {
                ok: true,
                data: Some(data),
                error: None,
                events,
            },
            Err(error) => Response {
                ok: false,
                data: None,
                error: Some(error),
                events,
            },
        }
    }
}

/// Runs a request against the session.
pub fn dispatch(store: &mut Storefront, request: Request) -> Result<Value, ApiError> {
    let data = match request {
        Request::ListProducts { category, sort } => {
            serde_json::to_value(product::list_products(store, category, sort))?
        }
        Request::SetCategory { category } => {
            serde_json::to_value(product::set_category(store, category))?
        }
        Request::SetSort { sort } => serde_json::to_value(product::set_sort(store, sort))?,
        Request::GetProduct { product_id } => {
            serde_json::to_value(product::get_product(store, product_id)?)?
        }
        Request::FilterOptions => serde_json::to_value(product::filter_options(store))?,
        Request::ToggleFavorite { product_id } => {
            serde_json::to_value(product::toggle_favorite(store, product_id))?
        }
        Request::GetCart => serde_json::to_value(cart::get_cart(store))?,
        Request::AddToCart { product_id, kind } => {
            serde_json::to_value(cart::add_to_cart(store, product_id, kind))?
        }
        Request::Buy { product_id } => serde_json::to_value(cart::buy(store, product_id))?,
        Request::Rent { product_id } => serde_json::to_value(cart::rent(store, product_id))?,
        Request::RemoveFromCart { product_id, kind } => {
            serde_json::to_value(cart::remove_from_cart(store, product_id, kind))?
        }
        Request::UpdateCartItem {
            product_id,
            kind,
            quantity,
        } => serde_json::to_value(cart::update_cart_item(store, product_id, kind, quantity)?)?,
        Request::ClearCart => serde_json::to_value(cart::clear_cart(store))?,
        Request::OpenCart => serde_json::to_value(cart::open_cart(store))?,
        Request::CloseCart => serde_json::to_value(cart::close_cart(store))?,
        Request::Checkout => serde_json::to_value(checkout::checkout(store))?,
        Request::GetConfig => serde_json::to_value(config::get_config(store))?,
    };
    Ok(data)
}

/// Handles one request line and returns the response line (no newline).
pub fn handle_line(store: &mut Storefront, line: &str) -> Result<String, ApiError> {
    let result = match serde_json::from_str::<Request>(line) {
        Ok(request) => dispatch(store, request),
        Err(e) => {
            warn!(error = %e, "Malformed request line");
            Err(ApiError::bad_request(e.to_string()))
        }
    };

    if let Err(e) = &result {
        debug!(error = %e, "Command failed");
    }

    let events = store.take_events();
    let response = Response::new(result, &events);
    Ok(serde_json::to_string(&response)?)
}

/// Serves requests until EOF.
///
/// Blank lines are skipped. Each other line gets exactly one response.
pub fn serve<R, W>(store: &mut Storefront, reader: R, mut writer: W) -> io::Result<()>
where
    R: BufRead,
    W: Write,
{
    info!("Bridge ready");
    let mut handled = 0usize;

    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let response = handle_line(store, line).unwrap_or_else(|e| {
            // Only reachable if the response itself fails to encode
            format!(
                r#"{{"ok":false,"error":{{"code":"INTERNAL","message":{}}},"events":[]}}"#,
                Value::String(e.message)
            )
        });
        writeln!(writer, "{}", response)?;
        writer.flush()?;
        handled += 1;
    }

    info!(requests = handled, "Bridge input closed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(input: &str) -> Vec<Value> {
        let mut store = Storefront::default();
        let mut output = Vec::new();
        serve(&mut store, input.as_bytes(), &mut output).unwrap();
        String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn test_parse_requests() {
        let request: Request =
            serde_json::from_str(r#"{"cmd":"update_cart_item","productId":"1","type":"rent","quantity":3}"#)
                .unwrap();
        assert_eq!(
            request,
            Request::UpdateCartItem {
                product_id: "1".to_string(),
                kind: TransactionType::Rent,
                quantity: 3,
            }
        );

        let request: Request = serde_json::from_str(r#"{"cmd":"add_to_cart","productId":"2"}"#).unwrap();
        assert_eq!(
            request,
            Request::AddToCart {
                product_id: "2".to_string(),
                kind: None,
            }
        );

        let request: Request = serde_json::from_str(r#"{"cmd":"list_products"}"#).unwrap();
        assert_eq!(
            request,
            Request::ListProducts {
                category: None,
                sort: None,
            }
        );
    }

    #[test]
    fn test_session_over_bridge() {
        let responses = run(concat!(
            r#"{"cmd":"buy","productId":"1"}"#,
            "\n",
            r#"{"cmd":"buy","productId":"1"}"#,
            "\n",
            r#"{"cmd":"rent","productId":"1"}"#,
            "\n",
            r#"{"cmd":"get_cart"}"#,
            "\n",
        ));

        assert_eq!(responses.len(), 4);
        assert_eq!(responses[0]["ok"], true);
        assert_eq!(responses[0]["events"][0]["title"], "Added to Cart");
        assert_eq!(
            responses[0]["events"][0]["description"],
            "Mahindra 575 DI Tractor added to your cart"
        );

        let cart = &responses[3]["data"];
        assert_eq!(cart["totals"]["lineCount"], 2);
        assert_eq!(cart["totals"]["totalItemCount"], 3);
        assert_eq!(cart["totalDisplay"], "₹1,702,500");
        assert!(responses[3]["events"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_malformed_line_keeps_loop_alive() {
        let responses = run("not json\n\n{\"cmd\":\"launch_rockets\"}\n{\"cmd\":\"get_cart\"}\n");

        assert_eq!(responses.len(), 3);
        assert_eq!(responses[0]["ok"], false);
        assert_eq!(responses[0]["error"]["code"], "BAD_REQUEST");
        assert_eq!(responses[1]["error"]["code"], "BAD_REQUEST");
        assert_eq!(responses[2]["ok"], true);
    }

    #[test]
    fn test_negative_quantity_error() {
        let responses = run(concat!(
            r#"{"cmd":"rent","productId":"5"}"#,
            "\n",
            r#"{"cmd":"update_cart_item","productId":"5","type":"rent","quantity":-1}"#,
            "\n",
            r#"{"cmd":"get_cart"}"#,
            "\n",
        ));

        assert_eq!(responses[1]["ok"], false);
        assert_eq!(responses[1]["error"]["code"], "INVALID_QUANTITY");
        assert!(responses[1]["events"].as_array().unwrap().is_empty());
        assert_eq!(responses[2]["data"]["items"][0]["quantity"], 1);
    }

    #[test]
    fn test_quantity_above_cap_keeps_session_alive() {
        let responses = run(concat!(
            r#"{"cmd":"buy","productId":"1"}"#,
            "\n",
            r#"{"cmd":"update_cart_item","productId":"1","type":"buy","quantity":1000000000000}"#,
            "\n",
            r#"{"cmd":"update_cart_item","productId":"1","type":"buy","quantity":1000}"#,
            "\n",
            r#"{"cmd":"get_cart"}"#,
            "\n",
        ));

        assert_eq!(responses.len(), 4);
        assert_eq!(responses[1]["ok"], false);
        assert_eq!(responses[1]["error"]["code"], "INVALID_QUANTITY");
        assert_eq!(responses[2]["error"]["code"], "INVALID_QUANTITY");
        assert_eq!(responses[3]["data"]["items"][0]["quantity"], 1);
        assert_eq!(responses[3]["data"]["totalDisplay"], "₹850,000");
    }

    #[test]
    fn test_unknown_product_is_silent() {
        let responses = run("{\"cmd\":\"buy\",\"productId\":\"99\"}\n");
        assert_eq!(responses[0]["ok"], true);
        assert!(responses[0]["data"]["items"].as_array().unwrap().is_empty());
        assert!(responses[0]["events"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_checkout_over_bridge() {
        let responses = run(concat!(
            r#"{"cmd":"buy","productId":"4"}"#,
            "\n",
            r#"{"cmd":"open_cart"}"#,
            "\n",
            r#"{"cmd":"checkout"}"#,
            "\n",
        ));

        let checkout = &responses[2];
        assert_eq!(checkout["events"][0]["title"], "Checkout Initiated");
        assert_eq!(checkout["data"]["cart"]["isOpen"], false);
        assert_eq!(checkout["data"]["cart"]["items"][0]["productId"], "4");
    }

    #[test]
    fn test_grid_over_bridge() {
        let responses = run(concat!(
            r#"{"cmd":"set_category","category":"machinery"}"#,
            "\n",
            r#"{"cmd":"set_sort","sort":"price-low"}"#,
            "\n",
            r#"{"cmd":"list_products","category":"Machinery"}"#,
            "\n",
        ));

        let ids: Vec<&str> = responses[1]["data"]["products"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["5", "3", "2", "1"]);
        assert_eq!(responses[2]["data"]["isEmpty"], true);
    }
}
