//! JSON REST API for Academia.
//!
//! Exposes an axum [`Router`] over the roster, catalog and plan assembly
//! services, generic over any [`GymStore`] and [`PhotoStore`]. Auth, TLS and
//! transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", academia_api::api_router(AppState::new(store, photos)))
//! ```

pub mod error;
pub mod exercises;
pub mod outcome;
pub mod payload;
pub mod plans;
pub mod staff;
pub mod students;

use std::sync::Arc;

use academia_core::{
  assembly::PlanAssembly, catalog::Catalog, photo::PhotoStore, roster::Roster,
  store::GymStore,
};
use axum::{
  Router,
  routing::{get, post, put},
};

pub use error::ApiError;

/// The services every handler draws from.
pub struct AppState<S, P> {
  pub roster:   Roster<S, P>,
  pub catalog:  Catalog<S>,
  pub assembly: PlanAssembly<S>,
}

impl<S, P> Clone for AppState<S, P> {
  fn clone(&self) -> Self {
    Self {
      roster:   self.roster.clone(),
      catalog:  self.catalog.clone(),
      assembly: self.assembly.clone(),
    }
  }
}

impl<S: GymStore, P: PhotoStore> AppState<S, P> {
  /// Build all three services over one shared store.
  pub fn new(store: Arc<S>, photos: Arc<P>) -> Self {
    Self {
      roster:   Roster::new(store.clone(), photos),
      catalog:  Catalog::new(store.clone()),
      assembly: PlanAssembly::new(store),
    }
  }
}

/// Build a fully-materialised API router for `state`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S, P>(state: AppState<S, P>) -> Router<()>
where
  S: GymStore + 'static,
  P: PhotoStore + 'static,
{
  Router::new()
    // Students
    .route("/students", get(students::list::<S, P>).post(students::create::<S, P>))
    .route(
      "/students/{id}",
      get(students::get_one::<S, P>)
        .put(students::update::<S, P>)
        .delete(students::delete::<S, P>),
    )
    .route("/students/{id}/plans", get(students::plans::<S, P>))
    // Staff
    .route("/staff", get(staff::list::<S, P>).post(staff::create::<S, P>))
    .route(
      "/staff/{id}",
      get(staff::get_one::<S, P>)
        .put(staff::update::<S, P>)
        .delete(staff::delete::<S, P>),
    )
    // Exercises
    .route("/exercises", get(exercises::list::<S, P>).post(exercises::create::<S, P>))
    .route(
      "/exercises/{id}",
      get(exercises::get_one::<S, P>)
        .put(exercises::update::<S, P>)
        .delete(exercises::delete::<S, P>),
    )
    // Plans
    .route("/plans", post(plans::create::<S, P>))
    .route(
      "/plans/{id}",
      get(plans::get_one::<S, P>)
        .patch(plans::rename::<S, P>)
        .delete(plans::delete::<S, P>),
    )
    .route("/plans/{id}/staff", put(plans::assign::<S, P>))
    .route(
      "/plans/{id}/items",
      get(plans::list_items::<S, P>).post(plans::add_item::<S, P>),
    )
    // Items
    .route("/items/{id}", get(plans::get_item::<S, P>).delete(plans::remove_item::<S, P>))
    .with_state(state)
}
