//! Outbound notifications: the `Notifier` seam and the messages sent through it.
//!
//! Three events produce mail: a client assigned to a partner (to that
//! partner), a client status change (to the admin), and a listing marked
//! "Shown to Client" (to the admin).

use std::future::Future;

use serde::{Deserialize, Serialize};

use maud::{DOCTYPE, Markup, html};

use crate::{client::Client, listing::Listing, user::Actor};

/// A rendered HTML email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email {
  pub to:        String,
  pub subject:   String,
  pub html_body: String,
}

/// Delivers [`Email`]s. Delivery is best-effort: callers log failures and
/// carry on.
pub trait Notifier: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  fn send(&self, email: Email) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}

// ─── Messages ────────────────────────────────────────────────────────────────

fn page(title: &str, content: Markup) -> String {
  html! {
    (DOCTYPE)
    html {
      body {
        h2 { (title) }
        (content)
      }
    }
  }
  .into_string()
}

impl Email {
  /// Tell a partner a new client has been assigned to them.
  pub fn client_assigned(partner_email: &str, client: &Client) -> Self {
    let content = html! {
      p { "Hi " (client.assigned_to) "," }
      p { "A new client has been assigned to you:" }
      ul {
        li { strong { "Client Name:" } " " (client.name) }
        li { strong { "Contact:" } " " (client.contact) }
        li { strong { "Type:" } " " (client.client_type) }
        li {
          strong { "Property:" } " "
          (client.property_category) " - " (client.property_type)
        }
        li {
          strong { "Budget:" } " "
          (client.budget_currency) " " (client.budget_min) " - " (client.budget_max)
        }
        li { strong { "Location:" } " " (client.location_preference.join(", ")) }
      }
      p { "Please follow up with the client." }
      p { strong { "Client ID:" } " " (client.client_id) }
    };
    Self {
      to:        partner_email.to_owned(),
      subject:   format!("New Client Assigned: {}", client.name),
      html_body: page("New Client Assigned to You", content),
    }
  }

  /// Tell the admin a client moved to a new status.
  pub fn client_status_changed(
    admin_email: &str,
    client: &Client,
    previous: &str,
    by: &Actor,
  ) -> Self {
    let content = html! {
      p {
        strong { (client.name) } " (" (client.client_id) ") moved from "
        em { (previous) } " to " strong { (client.status) } "."
      }
      p { "Updated by " (by.full_name) "." }
    };
    Self {
      to:        admin_email.to_owned(),
      subject:   format!("Client Status Update: {} - {}", client.name, client.status),
      html_body: page("Client Status Updated", content),
    }
  }

  /// Tell the admin a listing has been shown to clients.
  pub fn listing_shown(admin_email: &str, listing: &Listing, by: &Actor) -> Self {
    let content = html! {
      p {
        strong { (listing.address) } ", " (listing.location) " (" (listing.listing_id) ")"
      }
      p {
        "Shown to: "
        @if listing.shown_to_clients.is_empty() {
          "(not recorded)"
        } @else {
          (listing.shown_to_clients.join(", "))
        }
      }
      p { "Reported by " (by.full_name) "." }
    };
    Self {
      to:        admin_email.to_owned(),
      subject:   format!("Listing Shown: {}", listing.address),
      html_body: page("Listing Shown to Client", content),
    }
  }
}
