//! # Commands Module
//!
//! Every command the bridge exposes to the web UI.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (exports)
//! ├── product.rs   ◄─── Grid listing, selection, filter options, favorites
//! ├── cart.rs      ◄─── Cart manipulation and the cart panel
//! ├── checkout.rs  ◄─── Checkout request
//! └── config.rs    ◄─── Configuration retrieval
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  Web UI                                                                 │
//! │  ──────                                                                 │
//! │  {"cmd":"update_cart_item","productId":"1","type":"buy","quantity":3}   │
//! │         │                                                               │
//! │         │ (stdin, one JSON object per line)                             │
//! │         ▼                                                               │
//! │  Rust                                                                   │
//! │  ────                                                                   │
//! │  pub fn update_cart_item(                                               │
//! │      store: &mut Storefront,  ◄── Owned by the bridge loop              │
//! │      product_id: String,      ◄── From request fields                   │
//! │      kind: TransactionType,                                             │
//! │      quantity: i64,                                                     │
//! │  ) -> Result<CartResponse, ApiError>                                    │
//! │         │                                                               │
//! │         │ (JSON serialization, stdout)                                  │
//! │         ▼                                                               │
//! │  {"ok":true,"data":{"items":[...],"totals":{...}},"events":[...]}       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cart;
pub mod checkout;
pub mod config;
pub mod product;
