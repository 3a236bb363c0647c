//! Dashboard summaries.
//!
//! The admin summary covers every table; the partner summary covers what
//! the partner can see.

use std::collections::BTreeMap;

use estate_core::{
  client::Client,
  deal::{Deal, PaymentStatus},
  notify::Notifier,
  store::RecordStore,
  user::Actor,
  visibility::{visible_clients, visible_deals, visible_listings},
};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::Agency;

/// How many of the newest clients and deals a summary includes.
pub const RECENT_LIMIT: usize = 5;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "scope", rename_all = "snake_case")]
pub enum Summary {
  Admin(AdminSummary),
  Partner(PartnerSummary),
}

#[derive(Debug, Clone, Serialize)]
pub struct AdminSummary {
  pub total_clients:       usize,
  pub total_listings:      usize,
  pub deals_closed:        usize,
  pub pending_payments:    usize,
  pub total_brokerage:     Decimal,
  pub total_your_share:    Decimal,
  pub total_partner_share: Decimal,
  pub by_status:           BTreeMap<String, usize>,
  pub by_client_type:      BTreeMap<String, usize>,
  pub by_category:         BTreeMap<String, usize>,
  pub by_priority:         BTreeMap<String, usize>,
  pub by_assignee:         BTreeMap<String, usize>,
  pub recent_clients:      Vec<Client>,
  pub recent_deals:        Vec<Deal>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PartnerSummary {
  pub my_clients:     usize,
  pub my_listings:    usize,
  pub my_deals:       usize,
  pub my_commission:  Decimal,
  pub by_status:      BTreeMap<String, usize>,
  pub recent_clients: Vec<Client>,
}

fn tally<I, K>(keys: I) -> BTreeMap<String, usize>
where
  I: IntoIterator<Item = K>,
  K: ToString,
{
  let mut counts = BTreeMap::new();
  for key in keys {
    *counts.entry(key.to_string()).or_insert(0) += 1;
  }
  counts
}

fn newest<T: Clone>(rows: &[&T]) -> Vec<T> {
  let start = rows.len().saturating_sub(RECENT_LIMIT);
  rows[start..].iter().map(|r| (*r).clone()).collect()
}

impl<S: RecordStore, N: Notifier> Agency<S, N> {
  pub async fn summary(&self, actor: &Actor) -> Summary {
    let clients = self.clients.lock().await;
    let listings = self.listings.lock().await;
    let deals = self.deals.lock().await;

    let my_clients = visible_clients(&clients.rows, actor);
    let my_listings = visible_listings(&listings.rows, actor);
    let my_deals = visible_deals(&deals.rows, actor);

    if !actor.is_admin() {
      return Summary::Partner(PartnerSummary {
        my_clients:     my_clients.len(),
        my_listings:    my_listings.len(),
        my_deals:       my_deals.len(),
        my_commission:  my_deals.iter().map(|d| d.partner_share).sum(),
        by_status:      tally(my_clients.iter().map(|c| &c.status)),
        recent_clients: newest(&my_clients),
      });
    }

    Summary::Admin(AdminSummary {
      total_clients:       my_clients.len(),
      total_listings:      my_listings.len(),
      deals_closed:        my_deals.len(),
      pending_payments:    my_deals
        .iter()
        .filter(|d| d.payment_status == PaymentStatus::Pending)
        .count(),
      total_brokerage:     my_deals.iter().map(|d| d.total_brokerage).sum(),
      total_your_share:    my_deals.iter().map(|d| d.your_share).sum(),
      total_partner_share: my_deals.iter().map(|d| d.partner_share).sum(),
      by_status:           tally(my_clients.iter().map(|c| &c.status)),
      by_client_type:      tally(my_clients.iter().map(|c| c.client_type)),
      by_category:         tally(my_clients.iter().map(|c| c.property_category)),
      by_priority:         tally(my_clients.iter().map(|c| c.priority)),
      by_assignee:         tally(my_clients.iter().map(|c| &c.assigned_to)),
      recent_clients:      newest(&my_clients),
      recent_deals:        newest(&my_deals),
    })
  }
}
