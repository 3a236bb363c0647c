//! Client operations.

use estate_core::{
  Error, Result,
  client::{Client, NewClient},
  notify::{Email, Notifier},
  store::{RecordStore, table_rows},
  user::{ADMIN_ASSIGNEE, Actor, Role, UNASSIGNED, User},
  visibility::{can_see_client, visible_clients},
};
use tracing::info;

use crate::{Agency, Receipt, agency::today};

/// Check an assignee cell: `Unassigned`, `Admin`, or the full name of a
/// partner. Returns the partner when there is one.
pub(crate) fn resolve_assignee<'a>(users: &'a [User], assignee: &str) -> Result<Option<&'a User>> {
  if assignee == UNASSIGNED || assignee == ADMIN_ASSIGNEE {
    return Ok(None);
  }
  users
    .iter()
    .find(|u| u.role == Role::Partner && u.full_name == assignee)
    .map(Some)
    .ok_or_else(|| Error::Validation(format!("{assignee} is not a partner")))
}

impl<S: RecordStore, N: Notifier> Agency<S, N> {
  /// Clients the actor may see, in stored order.
  pub async fn list_clients(&self, actor: &Actor) -> Vec<Client> {
    let clients = self.clients.lock().await;
    visible_clients(&clients.rows, actor).into_iter().cloned().collect()
  }

  /// Register a client under the next `C` id. The assigned partner, if any,
  /// is told by email.
  pub async fn add_client(&self, actor: &Actor, input: NewClient) -> Result<Receipt<Client>> {
    actor.require_admin("add clients")?;
    input.validate()?;

    let recipient = {
      let users = self.users.lock().await;
      resolve_assignee(&users, &input.assigned_to)?
        .map(|partner| partner.email.clone())
        .filter(|email| !email.trim().is_empty())
    };

    let (client, mut warnings) = {
      let mut clients = self.clients.lock().await;
      let mut next = clients.clone();
      let client_id = next.ids.advance();
      let client = input.into_client(client_id, today());
      next.rows.push(client.clone());

      let batch = table_rows(next.rows.as_slice())?;
      let warnings: Vec<_> = self.flush(vec![batch]).await.into_iter().collect();
      *clients = next;
      (client, warnings)
    };
    info!(client_id = %client.client_id, assigned_to = %client.assigned_to, "client added");

    if let Some(to) = recipient {
      warnings.extend(self.notify(Email::client_assigned(&to, &client)).await);
    }
    Ok(Receipt::with_warnings(client, warnings))
  }

  /// Set a client's status to any text. Allowed to the admin and to partners
  /// who can see the client; the admin is told by email.
  pub async fn update_client_status(
    &self,
    actor: &Actor,
    client_id: &str,
    status: &str,
  ) -> Result<Receipt<Client>> {
    let status = status.trim();
    if status.is_empty() {
      return Err(Error::Validation("status is required".into()));
    }

    let (client, previous, mut warnings) = {
      let mut clients = self.clients.lock().await;
      let mut next = clients.clone();
      let client = next
        .get_mut(client_id)
        .filter(|c| can_see_client(actor, c))
        .ok_or_else(|| Error::not_found("client", client_id))?;
      let previous = std::mem::replace(&mut client.status, status.to_owned());
      let client = client.clone();

      let batch = table_rows(next.rows.as_slice())?;
      let warnings: Vec<_> = self.flush(vec![batch]).await.into_iter().collect();
      *clients = next;
      (client, previous, warnings)
    };
    info!(
      %client_id,
      %previous,
      status = %client.status,
      by = %actor.username,
      "client status updated"
    );

    if let Some(to) = self.admin_email().await {
      let email = Email::client_status_changed(&to, &client, &previous, actor);
      warnings.extend(self.notify(email).await);
    }
    Ok(Receipt::with_warnings(client, warnings))
  }

  /// Remove a client. Deals that reference it are left alone.
  pub async fn delete_client(&self, actor: &Actor, client_id: &str) -> Result<Receipt<Client>> {
    actor.require_admin("delete clients")?;

    let mut clients = self.clients.lock().await;
    let mut next = clients.clone();
    let removed = next
      .remove(client_id)
      .ok_or_else(|| Error::not_found("client", client_id))?;

    let batch = table_rows(next.rows.as_slice())?;
    let warnings = self.flush(vec![batch]).await;
    *clients = next;

    info!(%client_id, by = %actor.username, "client deleted");
    Ok(Receipt::with_warnings(removed, warnings))
  }
}
