//! In-memory user store.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use uuid::Uuid;

use crate::user::{
    NewUser, Result, StoreError, User, UserPatch, UserRepository,
    WorkExperience, WorkHistory,
};

#[derive(Debug, Default)]
struct Records {
    users: HashMap<String, User>,
    /// Identifiers in insertion order.
    order: Vec<String>,
}

impl Records {
    fn email_taken(&self, email: &str, except: Option<&str>) -> bool {
        self.users.values().any(|user| {
            Some(user.id.as_str()) != except
                && user.email.eq_ignore_ascii_case(email)
        })
    }

    fn fresh_id(&self) -> String {
        loop {
            let id = Uuid::new_v4().to_string();
            if !self.users.contains_key(&id) {
                return id;
            }
        }
    }

    fn insert(&mut self, user: NewUser) -> User {
        let user = user.into_user(self.fresh_id());
        self.order.push(user.id.clone());
        self.users.insert(user.id.clone(), user.clone());
        user
    }
}

/// Volatile store guarded by a single mutex.
#[derive(Debug)]
pub struct MemoryRepository {
    records: Mutex<Records>,
    unique_email: bool,
}

impl Default for MemoryRepository {
    fn default() -> Self {
        Self::new(true)
    }
}

impl MemoryRepository {
    /// Create an empty [`MemoryRepository`].
    pub fn new(unique_email: bool) -> Self {
        Self {
            records: Mutex::new(Records::default()),
            unique_email,
        }
    }

    /// Create a [`MemoryRepository`] holding the sample users.
    pub fn seeded(unique_email: bool) -> Self {
        let mut records = Records::default();
        for user in sample_users() {
            records.insert(user);
        }

        tracing::debug!(count = records.order.len(), "sample users loaded");

        Self {
            records: Mutex::new(records),
            unique_email,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Records>> {
        self.records.lock().map_err(|_| StoreError::Poisoned)
    }
}

#[async_trait::async_trait]
impl UserRepository for MemoryRepository {
    async fn list(&self) -> Result<Vec<User>> {
        let records = self.lock()?;
        Ok(records
            .order
            .iter()
            .filter_map(|id| records.users.get(id).cloned())
            .collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>> {
        Ok(self.lock()?.users.get(id).cloned())
    }

    async fn create(&self, user: NewUser) -> Result<User> {
        let mut records = self.lock()?;
        if let Some(email) = user.email.as_deref() {
            if self.unique_email && records.email_taken(email, None) {
                return Err(StoreError::EmailTaken(email.to_owned()));
            }
        }

        Ok(records.insert(user))
    }

    async fn update(&self, id: &str, patch: UserPatch) -> Result<Option<User>> {
        let mut records = self.lock()?;
        if !records.users.contains_key(id) {
            return Ok(None);
        }

        if let Some(email) = patch.email.as_deref() {
            if self.unique_email && records.email_taken(email, Some(id)) {
                return Err(StoreError::EmailTaken(email.to_owned()));
            }
        }

        Ok(records.users.get_mut(id).map(|user| {
            patch.apply(user);
            user.clone()
        }))
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let mut records = self.lock()?;
        if records.users.remove(id).is_none() {
            return Ok(false);
        }

        records.order.retain(|existing| existing != id);
        Ok(true)
    }
}

fn sample_users() -> Vec<NewUser> {
    vec![
        NewUser {
            first_name: Some("Dave".into()),
            last_name: Some("Richards".into()),
            email: Some("dave@mail.com".into()),
            phone: Some("8332883854".into()),
            year_of_birth: Some("1990".into()),
            gender: Some("male".into()),
            alternate_phone: Some("9876543210".into()),
            address: Some("123 Main Street, Apartment 4B".into()),
            pincode: Some("400001".into()),
            domicile_state: Some("maharashtra".into()),
            domicile_country: Some("india".into()),
            school: Some("Lincoln College".into()),
            degree: Some("Bachelors in Technology".into()),
            course: Some("Computer Science Engineering".into()),
            year_of_completion: Some("2012".into()),
            grade: Some("A".into()),
            skills: Some("JavaScript, React, Node.js, TypeScript".into()),
            projects: Some(
                "E-commerce platform, Social media dashboard".into(),
            ),
            work_experience: Some(WorkHistory::new(vec![WorkExperience {
                domain: "Technology".into(),
                subdomain: "MERN Stack".into(),
                experience: "3-5".into(),
            }])),
            linked_in: Some("linkedin.com/in/daverichards".into()),
            resume: Some("myresume.pdf".into()),
        },
        NewUser {
            first_name: Some("Abhishek".into()),
            last_name: Some("Hari".into()),
            email: Some("hari@mail.com".into()),
            phone: Some("9876543210".into()),
            ..Default::default()
        },
        NewUser {
            first_name: Some("Nishta".into()),
            last_name: Some("Gupta".into()),
            email: Some("nishta@mail.com".into()),
            phone: Some("8765432109".into()),
            ..Default::default()
        },
    ]
}
