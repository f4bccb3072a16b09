//! In-process stores backing `AppState::fake`. They enforce the same unique
//! and foreign-key rules as the Postgres schema.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use time::OffsetDateTime;

use crate::{
    cars::{
        repo::CarStore,
        repo_types::{Car, NewCar},
    },
    customers::{
        repo::CustomerStore,
        repo_types::{Customer, NewCustomer},
    },
    db::StoreError,
    users::{
        repo::UserStore,
        repo_types::{NewUser, User, UserChanges},
    },
};

#[derive(Default)]
struct Tables {
    next_id: i64,
    users: Vec<User>,
    cars: Vec<Car>,
    customers: Vec<Customer>,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn check_user_unique(&self, id: i64, username: &str, email: &str) -> Result<(), StoreError> {
        let clash = self
            .users
            .iter()
            .any(|u| u.id != id && (u.username == username || u.email == email));
        if clash {
            return Err(StoreError::Conflict("duplicate username or email".into()));
        }
        Ok(())
    }

    fn check_car(&self, id: i64, car: &NewCar) -> Result<(), StoreError> {
        if self.cars.iter().any(|c| c.id != id && c.plates == car.plates) {
            return Err(StoreError::Conflict("duplicate plates".into()));
        }
        if let Some(customer_id) = car.customer_id {
            if !self.customers.iter().any(|c| c.id == customer_id) {
                return Err(StoreError::Conflict("customer does not exist".into()));
            }
        }
        Ok(())
    }

    fn check_customer_unique(&self, id: i64, customer: &NewCustomer) -> Result<(), StoreError> {
        let clash = self.customers.iter().any(|c| {
            c.id != id && (c.ident_document == customer.ident_document || c.email == customer.email)
        });
        if clash {
            return Err(StoreError::Conflict("duplicate document or email".into()));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryDb {
    tables: Mutex<Tables>,
}

impl MemoryDb {
    fn lock(&self) -> MutexGuard<'_, Tables> {
        // A panicking test poisons only its own db.
        self.tables.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl UserStore for MemoryDb {
    async fn create(&self, new: NewUser) -> Result<User, StoreError> {
        let mut t = self.lock();
        t.check_user_unique(0, &new.username, &new.email)?;
        let now = OffsetDateTime::now_utc();
        let user = User {
            id: t.next_id(),
            username: new.username,
            email: new.email,
            password: new.password_hash,
            is_admin: new.is_admin,
            created_at: now,
            updated_at: now,
        };
        t.users.push(user.clone());
        Ok(user)
    }

    async fn list(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.lock().users.clone())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, StoreError> {
        Ok(self.lock().users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_login(
        &self,
        username: Option<&str>,
        email: Option<&str>,
    ) -> Result<Option<User>, StoreError> {
        let t = self.lock();
        let found = t.users.iter().find(|u| {
            username.is_some_and(|n| u.username == n) || email.is_some_and(|e| u.email == e)
        });
        Ok(found.cloned())
    }

    async fn update(&self, id: i64, changes: UserChanges) -> Result<bool, StoreError> {
        let mut t = self.lock();
        let Some(current) = t.users.iter().find(|u| u.id == id).cloned() else {
            return Ok(false);
        };
        let username = changes.username.unwrap_or(current.username);
        let email = changes.email.unwrap_or(current.email);
        t.check_user_unique(id, &username, &email)?;

        if let Some(user) = t.users.iter_mut().find(|u| u.id == id) {
            user.username = username;
            user.email = email;
            if let Some(hash) = changes.password_hash {
                user.password = hash;
            }
            if let Some(is_admin) = changes.is_admin {
                user.is_admin = is_admin;
            }
            user.updated_at = OffsetDateTime::now_utc();
        }
        Ok(true)
    }

    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let mut t = self.lock();
        let before = t.users.len();
        t.users.retain(|u| u.id != id);
        Ok(t.users.len() < before)
    }

    async fn count_admins(&self) -> Result<i64, StoreError> {
        Ok(self.lock().users.iter().filter(|u| u.is_admin).count() as i64)
    }
}

#[async_trait]
impl CarStore for MemoryDb {
    async fn create(&self, car: NewCar) -> Result<Car, StoreError> {
        let mut t = self.lock();
        t.check_car(0, &car)?;
        let now = OffsetDateTime::now_utc();
        let row = Car {
            id: t.next_id(),
            brand: car.brand,
            model: car.model,
            color: car.color,
            year_manufacture: car.year_manufacture,
            imported: car.imported,
            plates: car.plates,
            selling_date: car.selling_date,
            selling_price: car.selling_price,
            customer_id: car.customer_id,
            created_at: now,
            updated_at: now,
        };
        t.cars.push(row.clone());
        Ok(row)
    }

    async fn list(&self) -> Result<Vec<Car>, StoreError> {
        let mut cars = self.lock().cars.clone();
        cars.sort_by(|a, b| (&a.brand, &a.model, a.id).cmp(&(&b.brand, &b.model, b.id)));
        Ok(cars)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Car>, StoreError> {
        Ok(self.lock().cars.iter().find(|c| c.id == id).cloned())
    }

    async fn update(&self, id: i64, car: NewCar) -> Result<bool, StoreError> {
        let mut t = self.lock();
        if !t.cars.iter().any(|c| c.id == id) {
            return Ok(false);
        }
        t.check_car(id, &car)?;
        if let Some(row) = t.cars.iter_mut().find(|c| c.id == id) {
            row.brand = car.brand;
            row.model = car.model;
            row.color = car.color;
            row.year_manufacture = car.year_manufacture;
            row.imported = car.imported;
            row.plates = car.plates;
            row.selling_date = car.selling_date;
            row.selling_price = car.selling_price;
            row.customer_id = car.customer_id;
            row.updated_at = OffsetDateTime::now_utc();
        }
        Ok(true)
    }

    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let mut t = self.lock();
        let before = t.cars.len();
        t.cars.retain(|c| c.id != id);
        Ok(t.cars.len() < before)
    }
}

#[async_trait]
impl CustomerStore for MemoryDb {
    async fn create(&self, customer: NewCustomer) -> Result<Customer, StoreError> {
        let mut t = self.lock();
        t.check_customer_unique(0, &customer)?;
        let now = OffsetDateTime::now_utc();
        let row = Customer {
            id: t.next_id(),
            name: customer.name,
            ident_document: customer.ident_document,
            birth_date: customer.birth_date,
            street_name: customer.street_name,
            house_number: customer.house_number,
            complements: customer.complements,
            district: customer.district,
            municipality: customer.municipality,
            state: customer.state,
            phone: customer.phone,
            email: customer.email,
            created_at: now,
            updated_at: now,
        };
        t.customers.push(row.clone());
        Ok(row)
    }

    async fn list(&self) -> Result<Vec<Customer>, StoreError> {
        let mut customers = self.lock().customers.clone();
        customers.sort_by(|a, b| (&a.name, a.id).cmp(&(&b.name, b.id)));
        Ok(customers)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Customer>, StoreError> {
        Ok(self.lock().customers.iter().find(|c| c.id == id).cloned())
    }

    async fn update(&self, id: i64, customer: NewCustomer) -> Result<bool, StoreError> {
        let mut t = self.lock();
        if !t.customers.iter().any(|c| c.id == id) {
            return Ok(false);
        }
        t.check_customer_unique(id, &customer)?;
        if let Some(row) = t.customers.iter_mut().find(|c| c.id == id) {
            row.name = customer.name;
            row.ident_document = customer.ident_document;
            row.birth_date = customer.birth_date;
            row.street_name = customer.street_name;
            row.house_number = customer.house_number;
            row.complements = customer.complements;
            row.district = customer.district;
            row.municipality = customer.municipality;
            row.state = customer.state;
            row.phone = customer.phone;
            row.email = customer.email;
            row.updated_at = OffsetDateTime::now_utc();
        }
        Ok(true)
    }

    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let mut t = self.lock();
        if t.cars.iter().any(|c| c.customer_id == Some(id)) {
            return Err(StoreError::Conflict("customer still has cars".into()));
        }
        let before = t.customers.len();
        t.customers.retain(|c| c.id != id);
        Ok(t.customers.len() < before)
    }
}
