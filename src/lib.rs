//! Todos Frontend Entry Point
//!
//! Progressive enhancement for the server-rendered todo list. The server
//! ships complete HTML; this module only wires two behaviors onto it:
//! incremental pagination (load more) and asynchronous completion toggling.

mod api;
mod dom;
mod models;
mod pager;
mod toggle;

use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    let Some(document) = dom::document() else {
        return;
    };

    pager::install(&document);
    toggle::install(&document);
}
