//! Listing operations.

use estate_core::{
  Error, Result,
  listing::{Listing, NewListing, SHOWN_TO_CLIENT},
  notify::{Email, Notifier},
  store::{RecordStore, table_rows},
  user::Actor,
  visibility::{can_see_listing, visible_clients, visible_listings},
};
use tracing::info;

use crate::{Agency, Receipt, agency::today, clients::resolve_assignee};

impl<S: RecordStore, N: Notifier> Agency<S, N> {
  /// Listings the actor may see, in stored order.
  pub async fn list_listings(&self, actor: &Actor) -> Vec<Listing> {
    let listings = self.listings.lock().await;
    visible_listings(&listings.rows, actor).into_iter().cloned().collect()
  }

  /// Record a property under the next `L` id, status `Available`.
  pub async fn add_listing(&self, actor: &Actor, input: NewListing) -> Result<Receipt<Listing>> {
    actor.require_admin("add listings")?;
    input.validate()?;
    {
      let users = self.users.lock().await;
      resolve_assignee(&users, &input.assigned_to)?;
    }

    let mut listings = self.listings.lock().await;
    let mut next = listings.clone();
    let listing_id = next.ids.advance();
    let listing = input.into_listing(listing_id, today());
    next.rows.push(listing.clone());

    let batch = table_rows(next.rows.as_slice())?;
    let warnings = self.flush(vec![batch]).await;
    *listings = next;

    info!(listing_id = %listing.listing_id, location = %listing.location, "listing added");
    Ok(Receipt::with_warnings(listing, warnings))
  }

  /// Set a listing's status to any text. A non-empty `shown_to_clients`
  /// replaces the recorded viewers; an empty one keeps them. Each viewer must
  /// be a client the actor can see. Moving to "Shown to Client" tells the
  /// admin.
  pub async fn update_listing_status(
    &self,
    actor: &Actor,
    listing_id: &str,
    status: &str,
    shown_to_clients: Vec<String>,
  ) -> Result<Receipt<Listing>> {
    let status = status.trim();
    if status.is_empty() {
      return Err(Error::Validation("status is required".into()));
    }
    let shown_to_clients: Vec<String> = shown_to_clients
      .into_iter()
      .map(|name| name.trim().to_owned())
      .filter(|name| !name.is_empty())
      .collect();
    if !shown_to_clients.is_empty() {
      let clients = self.clients.lock().await;
      let mine = visible_clients(&clients.rows, actor);
      if let Some(stranger) = shown_to_clients
        .iter()
        .find(|name| !mine.iter().any(|c| &c.name == *name))
      {
        return Err(Error::Validation(format!("{stranger} is not one of your clients")));
      }
    }

    let (listing, mut warnings) = {
      let mut listings = self.listings.lock().await;
      let mut next = listings.clone();
      let listing = next
        .get_mut(listing_id)
        .filter(|l| can_see_listing(actor, l))
        .ok_or_else(|| Error::not_found("listing", listing_id))?;
      listing.listing_status = status.to_owned();
      if !shown_to_clients.is_empty() {
        listing.shown_to_clients = shown_to_clients;
      }
      let listing = listing.clone();

      let batch = table_rows(next.rows.as_slice())?;
      let warnings: Vec<_> = self.flush(vec![batch]).await.into_iter().collect();
      *listings = next;
      (listing, warnings)
    };
    info!(%listing_id, %status, by = %actor.username, "listing status updated");

    if listing.listing_status == SHOWN_TO_CLIENT
      && let Some(to) = self.admin_email().await
    {
      warnings.extend(self.notify(Email::listing_shown(&to, &listing, actor)).await);
    }
    Ok(Receipt::with_warnings(listing, warnings))
  }

  pub async fn delete_listing(&self, actor: &Actor, listing_id: &str) -> Result<Receipt<Listing>> {
    actor.require_admin("delete listings")?;

    let mut listings = self.listings.lock().await;
    let mut next = listings.clone();
    let removed = next
      .remove(listing_id)
      .ok_or_else(|| Error::not_found("listing", listing_id))?;

    let batch = table_rows(next.rows.as_slice())?;
    let warnings = self.flush(vec![batch]).await;
    *listings = next;

    info!(%listing_id, by = %actor.username, "listing deleted");
    Ok(Receipt::with_warnings(removed, warnings))
  }
}
