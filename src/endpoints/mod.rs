//! Typed endpoint accessors
//!
//! Each accessor borrows the client and maps one family of Graph API
//! objects onto the request executor and the paginator:
//!
//! ```no_run
//! # async fn run(client: &threatexchange_client::ThreatExchangeClient) -> threatexchange_client::Result<()> {
//! use threatexchange_client::endpoints::DescriptorSearch;
//!
//! let search = DescriptorSearch::new().text("evil.example.com").limit(10);
//! let mut descriptors = client.descriptors().search(search);
//! while let Some(descriptor) = descriptors.next().await? {
//!     println!("{} {:?}", descriptor.id, descriptor.indicator);
//! }
//! # Ok(())
//! # }
//! ```

mod app;
mod descriptors;
mod indicators;
mod members;
mod privacy_groups;
mod tags;
mod updates;

pub use app::App;
pub use descriptors::{DescriptorSearch, DescriptorUpdate, Descriptors, NewDescriptor};
pub use indicators::{IndicatorSearch, Indicators};
pub use members::Members;
pub use privacy_groups::PrivacyGroups;
pub use tags::Tags;
pub use updates::{Updates, UpdatesQuery};

use crate::http::ThreatExchangeClient;
use crate::types::Params;
use serde_json::Value;

impl ThreatExchangeClient {
    pub fn descriptors(&self) -> Descriptors<'_> {
        Descriptors::new(self)
    }

    pub fn indicators(&self) -> Indicators<'_> {
        Indicators::new(self)
    }

    pub fn tags(&self) -> Tags<'_> {
        Tags::new(self)
    }

    pub fn privacy_groups(&self) -> PrivacyGroups<'_> {
        PrivacyGroups::new(self)
    }

    pub fn members(&self) -> Members<'_> {
        Members::new(self)
    }

    pub fn updates(&self) -> Updates<'_> {
        Updates::new(self)
    }

    pub fn app(&self) -> App<'_> {
        App::new(self)
    }
}

/// `fields` parameter, omitted when no fields are requested
pub(crate) fn field_params(fields: &[&str]) -> Params {
    let mut params = Params::new();
    params.insert_list("fields", fields);
    params
}

/// `id` of a create response, `""` when absent
pub(crate) fn created_id(body: &Value) -> String {
    match body.get("id") {
        Some(Value::String(id)) => id.clone(),
        Some(Value::Number(id)) => id.to_string(),
        _ => String::new(),
    }
}

/// `success` flag of a mutation response, `false` when absent
pub(crate) fn success_flag(body: &Value) -> bool {
    body.get("success").and_then(Value::as_bool).unwrap_or(false)
}
