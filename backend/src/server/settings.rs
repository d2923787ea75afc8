//! Board settings loaded via OrthoConfig.
//!
//! Every value can come from the command line, a configuration file or a
//! `RSBOARD_`-prefixed environment variable. The database URL additionally
//! falls back to the conventional `DATABASE_URL`.

use std::net::{AddrParseError, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;

use rsboard::domain::{SlotOverlay, UnknownSlotOverlay};
use rsboard::inbound::http::state::BoardTuning;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DATABASE_URL_FALLBACK: &str = "DATABASE_URL";

/// Startup configuration for the board server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "RSBOARD")]
pub struct BoardSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL; the in-memory store is used when absent.
    pub database_url: Option<String>,
    /// Budget granted to users registered without an explicit one.
    pub default_vote_budget: Option<u32>,
    /// Vote records returned per page.
    pub vote_record_page_size: Option<u32>,
    /// Compare-and-set attempts per slot purchase before reporting a conflict.
    pub purchase_attempts: Option<u32>,
    /// `absolute` or `window-relative`.
    pub slot_overlay: Option<String>,
}

impl BoardSettings {
    pub fn bind_addr(&self) -> Result<SocketAddr, AddrParseError> {
        self.bind_addr
            .as_deref()
            .unwrap_or(DEFAULT_BIND_ADDR)
            .parse()
    }

    /// Configured database URL, falling back to `DATABASE_URL`.
    pub fn database_url(&self) -> Option<String> {
        self.database_url
            .clone()
            .or_else(|| std::env::var(DATABASE_URL_FALLBACK).ok())
            .filter(|url| !url.trim().is_empty())
    }

    /// Service tuning with defaults filled in for unset values.
    pub fn tuning(&self) -> Result<BoardTuning, UnknownSlotOverlay> {
        let defaults = BoardTuning::default();
        let slot_overlay = match self.slot_overlay.as_deref() {
            Some(name) => name.parse::<SlotOverlay>()?,
            None => defaults.slot_overlay,
        };
        Ok(BoardTuning {
            default_vote_budget: self
                .default_vote_budget
                .unwrap_or(defaults.default_vote_budget),
            vote_record_page_size: self
                .vote_record_page_size
                .unwrap_or(defaults.vote_record_page_size),
            purchase_attempts: self.purchase_attempts.unwrap_or(defaults.purchase_attempts),
            slot_overlay,
        })
    }
}
