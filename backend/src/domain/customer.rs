//! Customer records referenced by invoices.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::invoice::CustomerId;

/// Read-only customer record used to populate invoice forms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Identifier referenced by invoices.
    pub id: CustomerId,
    /// Display name.
    #[schema(example = "Evil Rabbit")]
    pub name: String,
    /// Contact email.
    #[schema(example = "evil@rabbit.com")]
    pub email: String,
    /// Avatar location.
    #[schema(example = "/customers/evil-rabbit.png")]
    pub image_url: String,
}
