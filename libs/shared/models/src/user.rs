use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Specialist,
    Patient,
}

/// The signed-in principal, as data. How its token was obtained is the
/// embedder's concern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: Uuid,
    pub tenant_id: String,
    pub full_name: String,
    pub email: String,
    pub role: Role,
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Admins manage any schedule; specialists only their own.
    pub fn can_manage_schedule(&self, specialist_id: Uuid) -> bool {
        match self.role {
            Role::Admin => true,
            Role::Specialist => self.id == specialist_id,
            Role::Patient => false,
        }
    }

    /// Clinical documents (records, prescriptions, certificates) are
    /// authored by specialists.
    pub fn can_issue_documents(&self) -> bool {
        self.role == Role::Specialist
    }
}
