//! Newsletter recommendation graphs: a bipartite layout and edge-routing engine
//! ([`network`]) and the Leptos client-side app that draws it.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use log::{Level, info};

// Modules
mod components;
/// Layout, routing and aggregation engine. Independent of the UI.
pub mod network;
mod pages;

// Top-Level pages
use crate::pages::categories::CategoryNetwork;
use crate::pages::explorer::PublicationExplorer;
use crate::pages::home::Home;
use crate::pages::network::PublicationNetwork;
use crate::pages::not_found::NotFound;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("Logging initialized");
}

/// Routes for the recommendation map and the force-directed views.
#[component]
pub fn App() -> impl IntoView {
	// Provides context that manages stylesheets, titles, meta tags, etc.
	provide_meta_context();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="light" />

		// sets the document title
		<Title text="Newsletter recommendation graphs" />

		// injects metadata in the <head> of the page
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Router>
			<Routes fallback=|| view! { <NotFound /> }>
				<Route path=path!("/") view=Home />
				<Route path=path!("/graph") view=PublicationNetwork />
				<Route path=path!("/graph/categories") view=CategoryNetwork />
				<Route path=path!("/graph/2D3D") view=PublicationExplorer />
			</Routes>
		</Router>
	}
}
