//! Shared fixtures: an in-memory SQLite database migrated by the real
//! `Migrator`, and helpers to seed the roster through the services.

#![allow(dead_code)]

use std::sync::Arc;

use chrono::NaiveDate;

use shift_planner::domain::{CreateEmployee, NameInput, SectorInput};
use shift_planner::infra::{Database, Persistence};
use shift_planner::services::{CatalogManager, CatalogService, EmployeeManager, EmployeeService};

pub async fn test_database() -> Database {
    let db = Database::open("sqlite::memory:")
        .await
        .expect("open in-memory sqlite");
    db.run_migrations().await.expect("run migrations");
    db
}

pub struct Fixture {
    pub db: Database,
    pub uow: Arc<Persistence>,
    pub catalog: CatalogManager<Persistence>,
    pub employees: EmployeeManager<Persistence>,
}

impl Fixture {
    pub async fn new() -> Self {
        let db = test_database().await;
        let uow = Arc::new(Persistence::new(db.get_connection()));
        Self {
            catalog: CatalogManager::new(uow.clone()),
            employees: EmployeeManager::new(uow.clone()),
            uow,
            db,
        }
    }

    pub async fn ce(&self, name: &str) -> i32 {
        self.catalog
            .create_ce(NameInput { name: name.to_string() })
            .await
            .expect("create ce")
            .id
    }

    pub async fn sector(&self, name: &str) -> i32 {
        self.catalog
            .create_sector(SectorInput {
                name: name.to_string(),
                required_skills: None,
            })
            .await
            .expect("create sector")
            .id
    }

    pub async fn skill(&self, name: &str) -> i32 {
        self.catalog
            .create_skill(NameInput { name: name.to_string() })
            .await
            .expect("create skill")
            .id
    }

    pub async fn employee(&self, name: &str, ce_id: Option<i32>, sector_id: Option<i32>) -> i32 {
        self.employees
            .create_employee(CreateEmployee {
                name: name.to_string(),
                ce_id,
                sector_id,
                skills: Vec::new(),
            })
            .await
            .expect("create employee")
            .id
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}
