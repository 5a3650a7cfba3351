//! # Shell
//!
//! Command-line adapter over the core. Picks a view (directly or through
//! the route table), drives the `Store`, and renders state as text.
//! `browse` hands the store to the interactive TUI instead.

pub mod render;

use std::io::{self, Write};
use std::sync::Arc;

use clap::Subcommand;
use log::{info, warn};

use crate::api::OperadorasApi;
use crate::core::{Route, Store};
use crate::tui;
use render::{render_estatisticas, render_listing, render_operadora};

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Fetch one page of the operator listing
    List {
        #[arg(short, long, default_value_t = 1)]
        page: u32,
        #[arg(short, long, default_value = "")]
        search: String,
    },
    /// Show one operator (by CNPJ or ANS registration) and its expenses
    Show { cnpj: String },
    /// Show aggregate statistics
    Stats,
    /// Render the view a path resolves to (e.g. `/operadora/123`)
    Open { path: String },
    /// Page through the listing in an interactive terminal view
    Browse {
        #[arg(short, long, default_value = "")]
        search: String,
    },
}

pub async fn run(command: Command, api: Arc<dyn OperadorasApi>, page_size: u32) -> io::Result<()> {
    let mut store = Store::new(api, page_size);
    let mut out = io::stdout();

    match command {
        Command::List { page, search } => list(&mut store, page, search, &mut out).await,
        Command::Show { cnpj } => show(store.api().as_ref(), &cnpj, &mut out).await,
        Command::Stats => stats(&mut store, &mut out).await,
        Command::Open { path } => open(&mut store, &path, &mut out).await,
        Command::Browse { search } => {
            store.fetch_operadoras(1, search);
            store.fetch_estatisticas();
            tui::run(&mut store)
        }
    }
}

pub async fn list<W: Write>(
    store: &mut Store,
    page: u32,
    search: String,
    out: &mut W,
) -> io::Result<()> {
    store.fetch_operadoras(page, search);
    store.settle().await;
    render_listing(out, store.state())
}

pub async fn show<W: Write>(api: &dyn OperadorasApi, cnpj: &str, out: &mut W) -> io::Result<()> {
    let (operadora, despesas) =
        tokio::join!(api.get_operadora(cnpj), api.get_operadora_despesas(cnpj));
    match operadora {
        Ok(operadora) => render_operadora(out, &operadora, &despesas),
        Err(err) => writeln!(out, "Erro: {err}"),
    }
}

pub async fn stats<W: Write>(store: &mut Store, out: &mut W) -> io::Result<()> {
    store.fetch_estatisticas();
    store.settle().await;
    render_estatisticas(out, store.state())
}

/// Resolves `path` through the route table and renders that view.
pub async fn open<W: Write>(store: &mut Store, path: &str, out: &mut W) -> io::Result<()> {
    match Route::resolve(path) {
        Some(route) => {
            info!("Route {} -> {}", path, route.name());
            match route {
                Route::OperadorasList => list(store, 1, String::new(), out).await,
                Route::OperadoraDetails { cnpj } => show(store.api().as_ref(), &cnpj, out).await,
            }
        }
        None => {
            warn!("No route for {path}");
            writeln!(out, "Página não encontrada: {path}")
        }
    }
}
