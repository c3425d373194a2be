use serde_json::{json, Value};
use uuid::Uuid;

use shared_config::AppConfig;
use shared_models::{CurrentUser, Role};

pub struct TestConfig {
    pub api_base_url: String,
    pub api_key: String,
    pub tenant: String,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:9100".to_string(),
            api_key: "test-api-key".to_string(),
            tenant: "clinic-demo".to_string(),
        }
    }
}

impl TestConfig {
    /// Points the config at a mock server.
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            api_base_url: base_url.to_string(),
            ..Self::default()
        }
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            api_base_url: self.api_base_url.clone(),
            api_key: self.api_key.clone(),
            tenant: self.tenant.clone(),
        }
    }
}

pub struct TestUser {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub role: Role,
}

impl TestUser {
    pub fn new(email: &str, role: Role) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: email.to_string(),
            full_name: "Test User".to_string(),
            role,
        }
    }

    pub fn admin(email: &str) -> Self {
        Self::new(email, Role::Admin)
    }

    pub fn specialist(email: &str) -> Self {
        Self::new(email, Role::Specialist)
    }

    pub fn patient(email: &str) -> Self {
        Self::new(email, Role::Patient)
    }

    pub fn to_current_user(&self, tenant: &str) -> CurrentUser {
        CurrentUser {
            id: self.id,
            tenant_id: tenant.to_string(),
            full_name: self.full_name.clone(),
            email: self.email.clone(),
            role: self.role,
        }
    }
}

/// Canned JSON bodies for wiremock fixtures.
pub struct MockApiResponses;

impl MockApiResponses {
    pub fn success(data: Value) -> Value {
        json!({
            "success": true,
            "data": data
        })
    }

    pub fn success_message(message: &str) -> Value {
        json!({
            "success": true,
            "message": message
        })
    }

    pub fn failure(message: &str) -> Value {
        json!({
            "success": false,
            "message": message
        })
    }

    pub fn schedule_entry(specialist_id: Uuid, day_of_week: u8,
                          start: &str, end: &str, is_available: bool) -> Value {
        json!({
            "id": Uuid::new_v4(),
            "specialist_id": specialist_id,
            "tenant_id": "clinic-demo",
            "day_of_week": day_of_week,
            "start_time": start,
            "end_time": end,
            "is_available": is_available
        })
    }

    pub fn break_entry(specialist_id: Uuid, day_of_week: u8,
                       start: &str, end: &str, description: &str) -> Value {
        json!({
            "id": Uuid::new_v4(),
            "specialist_id": specialist_id,
            "tenant_id": "clinic-demo",
            "day_of_week": day_of_week,
            "start_time": start,
            "end_time": end,
            "description": description
        })
    }

    pub fn appointment(patient_id: Uuid, specialist_id: Uuid,
                       date: &str, status: &str) -> Value {
        json!({
            "id": Uuid::new_v4(),
            "patient_id": patient_id,
            "specialist_id": specialist_id,
            "tenant_id": "clinic-demo",
            "date": date,
            "reason": "Consulta general",
            "status": status,
            "notes": null
        })
    }

    pub fn patient(id: Uuid, email: &str) -> Value {
        json!({
            "id": id,
            "tenant_id": "clinic-demo",
            "full_name": "Ana Torres",
            "email": email,
            "phone": "+56 9 5555 0100",
            "document_id": "12.345.678-9",
            "birth_date": "1990-01-01"
        })
    }

    pub fn specialist(id: Uuid, email: &str) -> Value {
        json!({
            "id": id,
            "tenant_id": "clinic-demo",
            "full_name": "Dra. Carla Soto",
            "email": email,
            "specialty": "Dermatología",
            "license_number": "RM-48213",
            "bio": null
        })
    }
}
