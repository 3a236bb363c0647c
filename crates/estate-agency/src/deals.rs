//! Deal operations and the commission preview.

use estate_core::{
  Error, Result,
  client::DEAL_CLOSED,
  commission::{self, CommissionSplit},
  deal::{Deal, NewDeal, PaymentStatus},
  notify::Notifier,
  store::{RecordStore, table_rows},
  user::{Actor, Role},
  visibility::visible_deals,
};
use rust_decimal::Decimal;
use tracing::info;

use crate::{Agency, Receipt, agency::today};

impl<S: RecordStore, N: Notifier> Agency<S, N> {
  /// Deals the actor may see, in stored order.
  pub async fn list_deals(&self, actor: &Actor) -> Vec<Deal> {
    let deals = self.deals.lock().await;
    visible_deals(&deals.rows, actor).into_iter().cloned().collect()
  }

  /// The split a deal with these amounts would get. Nothing is stored.
  pub fn preview_commission(
    &self,
    brokerage_from_owner: Decimal,
    brokerage_from_client: Decimal,
    number_of_brokers: u32,
  ) -> Result<CommissionSplit> {
    commission::compute(brokerage_from_owner, brokerage_from_client, number_of_brokers)
  }

  /// Close a deal under the next `D` id and mark its client "Deal Closed".
  ///
  /// The deal row and the client status are saved in one batch, so a reader
  /// of either table never sees one without the other.
  pub async fn close_deal(&self, actor: &Actor, input: NewDeal) -> Result<Receipt<Deal>> {
    actor.require_admin("close deals")?;
    input.validate()?;
    let split = commission::compute(
      input.brokerage_from_owner,
      input.brokerage_from_client,
      input.number_of_brokers,
    )?;

    let users = self.users.lock().await;
    if !users
      .iter()
      .any(|u| u.role == Role::Partner && u.full_name == input.partner_name)
    {
      return Err(Error::Validation(format!(
        "{} is not a partner",
        input.partner_name
      )));
    }

    let mut clients = self.clients.lock().await;
    let listings = self.listings.lock().await;
    let mut deals = self.deals.lock().await;

    let mut next_clients = clients.clone();
    let client = next_clients
      .get_mut(&input.client_id)
      .ok_or_else(|| Error::not_found("client", input.client_id.as_str()))?;
    if let Some(listing_id) = &input.listing_id
      && listings.get(listing_id).is_none()
    {
      return Err(Error::not_found("listing", listing_id.as_str()));
    }
    client.status = DEAL_CLOSED.to_owned();

    let mut next_deals = deals.clone();
    let deal_id = next_deals.ids.advance();
    let deal = input.into_deal(deal_id, split, today());
    next_deals.rows.push(deal.clone());

    let batch = vec![
      table_rows(next_clients.rows.as_slice())?,
      table_rows(next_deals.rows.as_slice())?,
    ];
    let warnings = self.flush(batch).await;
    *clients = next_clients;
    *deals = next_deals;
    drop((deals, listings, clients, users));

    info!(
      deal_id = %deal.deal_id,
      client_id = %deal.client_id,
      total = %deal.total_brokerage,
      partner = %deal.partner_name,
      "deal closed"
    );
    Ok(Receipt::with_warnings(deal, warnings))
  }

  /// Mark a deal's brokerage as paid or pending. The only field of a deal
  /// that changes after closing.
  pub async fn set_payment_status(
    &self,
    actor: &Actor,
    deal_id: &str,
    status: PaymentStatus,
  ) -> Result<Receipt<Deal>> {
    actor.require_admin("change payment status")?;

    let mut deals = self.deals.lock().await;
    let mut next = deals.clone();
    let deal = next
      .get_mut(deal_id)
      .ok_or_else(|| Error::not_found("deal", deal_id))?;
    deal.payment_status = status;
    let deal = deal.clone();

    let batch = table_rows(next.rows.as_slice())?;
    let warnings = self.flush(vec![batch]).await;
    *deals = next;

    info!(%deal_id, %status, by = %actor.username, "payment status updated");
    Ok(Receipt::with_warnings(deal, warnings))
  }

  /// Remove a deal. The client keeps its "Deal Closed" status.
  pub async fn delete_deal(&self, actor: &Actor, deal_id: &str) -> Result<Receipt<Deal>> {
    actor.require_admin("delete deals")?;

    let mut deals = self.deals.lock().await;
    let mut next = deals.clone();
    let removed = next
      .remove(deal_id)
      .ok_or_else(|| Error::not_found("deal", deal_id))?;

    let batch = table_rows(next.rows.as_slice())?;
    let warnings = self.flush(vec![batch]).await;
    *deals = next;

    info!(%deal_id, by = %actor.username, "deal deleted");
    Ok(Receipt::with_warnings(removed, warnings))
  }
}
