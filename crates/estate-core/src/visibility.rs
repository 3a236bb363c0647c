//! Role-scoped visibility over the client, listing, and deal tables.
//!
//! Admins see every row. Partners see rows whose assignee (or, for deals, the
//! partner name) contains their full name, compared case-insensitively.
//! Listings additionally need `visible_to_partner`.
//!
//! Matching is by substring, so a partner named "Ann" also sees rows assigned
//! to "Anna". The sheets have always matched this way and assignee cells may
//! name several partners, so the behaviour is kept.

use crate::{client::Client, deal::Deal, listing::Listing, user::Actor};

/// Whether `cell` names the actor. A blank full name names nobody.
pub fn names_actor(cell: &str, actor: &Actor) -> bool {
  let needle = actor.full_name.to_lowercase();
  if needle.trim().is_empty() {
    return false;
  }
  cell.to_lowercase().contains(&needle)
}

pub fn can_see_client(actor: &Actor, client: &Client) -> bool {
  actor.is_admin() || names_actor(&client.assigned_to, actor)
}

pub fn can_see_listing(actor: &Actor, listing: &Listing) -> bool {
  actor.is_admin()
    || (names_actor(&listing.assigned_to, actor) && listing.visible_to_partner)
}

pub fn can_see_deal(actor: &Actor, deal: &Deal) -> bool {
  actor.is_admin() || names_actor(&deal.partner_name, actor)
}

pub fn visible_clients<'a>(all: &'a [Client], actor: &Actor) -> Vec<&'a Client> {
  all.iter().filter(|c| can_see_client(actor, c)).collect()
}

pub fn visible_listings<'a>(all: &'a [Listing], actor: &Actor) -> Vec<&'a Listing> {
  all.iter().filter(|l| can_see_listing(actor, l)).collect()
}

pub fn visible_deals<'a>(all: &'a [Deal], actor: &Actor) -> Vec<&'a Deal> {
  all.iter().filter(|d| can_see_deal(actor, d)).collect()
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;
  use rust_decimal::Decimal;

  use super::*;
  use crate::{
    client::{ClientType, LeadSource, Priority},
    deal::PaymentStatus,
    property::{Currency, PropertyCategory},
    user::Role,
  };

  fn today() -> NaiveDate { NaiveDate::from_ymd_opt(2026, 10, 18).unwrap() }

  fn partner(name: &str) -> Actor {
    Actor { username: name.to_lowercase(), role: Role::Partner, full_name: name.into() }
  }

  fn admin() -> Actor {
    Actor { username: "admin".into(), role: Role::Admin, full_name: "Lyndon".into() }
  }

  fn client(id: &str, assigned_to: &str) -> Client {
    Client {
      client_id:           id.into(),
      name:                format!("Client {id}"),
      contact:             "000".into(),
      email:               String::new(),
      client_type:         ClientType::Sale,
      property_category:   PropertyCategory::Commercial,
      property_type:       "Shop/Showroom".into(),
      furnishing:          None,
      budget_min:          Decimal::ONE,
      budget_max:          Decimal::TEN,
      budget_currency:     Currency::Crores,
      location_preference: vec!["Marol".into()],
      bhk_or_size:         String::new(),
      requirements_notes:  String::new(),
      possession_date:     None,
      status:              "New Lead".into(),
      assigned_to:         assigned_to.into(),
      date_registered:     today(),
      source:              LeadSource::Direct,
      priority:            Priority::Low,
    }
  }

  fn listing(id: &str, assigned_to: &str, visible: bool) -> Listing {
    Listing {
      listing_id:         id.into(),
      address:            format!("Address {id}"),
      location:           "Marol".into(),
      property_category:  PropertyCategory::Commercial,
      property_type:      "Warehouse".into(),
      furnishing:         None,
      bhk_or_size:        "5000 sq ft".into(),
      price:              Decimal::ONE,
      price_currency:     Currency::Crores,
      area_sqft:          Decimal::from(5000),
      broker_name:        "B".into(),
      broker_contact:     "1".into(),
      amenities:          String::new(),
      listing_status:     "Available".into(),
      date_added:         today(),
      visible_to_partner: visible,
      notes:              String::new(),
      assigned_to:        assigned_to.into(),
      shown_to_clients:   vec![],
    }
  }

  fn deal(id: &str, partner_name: &str) -> Deal {
    Deal {
      deal_id:               id.into(),
      client_id:             "C0001".into(),
      listing_id:            None,
      brokerage_from_owner:  Decimal::ZERO,
      brokerage_from_client: Decimal::ZERO,
      total_brokerage:       Decimal::ZERO,
      number_of_brokers:     1,
      per_broker:            Decimal::ZERO,
      your_share:            Decimal::ZERO,
      partner_share:         Decimal::ZERO,
      partner_name:          partner_name.into(),
      deal_date:             today(),
      payment_status:        PaymentStatus::Pending,
      notes:                 String::new(),
    }
  }

  fn ids<T>(rows: Vec<&T>, key: impl Fn(&T) -> &str) -> Vec<String> {
    rows.into_iter().map(|r| key(r).to_owned()).collect()
  }

  #[test]
  fn partner_sees_only_own_clients() {
    let all = vec![client("C1", "Ann"), client("C2", "Bob")];
    let seen = visible_clients(&all, &partner("Ann"));
    assert_eq!(ids(seen, |c| c.client_id.as_str()), vec!["C1"]);
  }

  #[test]
  fn admin_sees_everything() {
    let all = vec![client("C1", "Ann"), client("C2", "Unassigned")];
    assert_eq!(visible_clients(&all, &admin()).len(), 2);
    let listings = vec![listing("L1", "Bob", false)];
    assert_eq!(visible_listings(&listings, &admin()).len(), 1);
  }

  #[test]
  fn listing_needs_assignment_and_flag() {
    let all = vec![
      listing("L1", "Ann", true),
      listing("L2", "Ann", false),
      listing("L3", "Bob", true),
    ];
    let seen = visible_listings(&all, &partner("Ann"));
    assert_eq!(ids(seen, |l| l.listing_id.as_str()), vec!["L1"]);
  }

  #[test]
  fn matching_ignores_case() {
    let all = vec![client("C1", "ANN")];
    assert_eq!(visible_clients(&all, &partner("ann")).len(), 1);
  }

  #[test]
  fn substring_match_reaches_longer_names() {
    let all = vec![client("C1", "Anna"), client("C2", "Annabel"), client("C3", "Bob")];
    let seen = visible_clients(&all, &partner("Ann"));
    assert_eq!(ids(seen, |c| c.client_id.as_str()), vec!["C1", "C2"]);
  }

  #[test]
  fn deals_follow_partner_name() {
    let all = vec![deal("D1", "Ann"), deal("D2", "Bob")];
    let seen = visible_deals(&all, &partner("Bob"));
    assert_eq!(ids(seen, |d| d.deal_id.as_str()), vec!["D2"]);
  }

  #[test]
  fn blank_name_sees_nothing() {
    let all = vec![client("C1", "Ann")];
    assert!(visible_clients(&all, &partner("  ")).is_empty());
  }
}
