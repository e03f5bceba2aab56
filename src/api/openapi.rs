//! OpenAPI documentation configuration.
//!
//! Served through Swagger UI at `/swagger-ui`.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{auth_handler, employee_handler, planning_handler};
use crate::domain::{
    AddCePlanning, AddPlanning, BulkReassign, CreateEmployee, Employee, EmployeeListing,
    Planning, PlanningStatus, PlanningView, PopulateYear, Shift, ShiftType, ShiftTypeChange,
    Skill, Summary, UpdateCeStatus, UpdateEmployee, UpdatePlanning, UserRole,
};
use crate::services::LoginResponse;
use crate::types::{CountResponse, MessageResponse, SwapRequiredResponse};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Shift Planner API",
        version = "0.1.0",
        description = "Work-cell shift rotation, planning entries and staff assignments",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    paths(
        // Authentication endpoints
        auth_handler::login,
        auth_handler::verify_token,
        // Planning endpoints
        planning_handler::get_plannings,
        planning_handler::add_planning,
        planning_handler::update_planning,
        planning_handler::delete_planning,
        planning_handler::add_ce_planning,
        planning_handler::update_ce_planning,
        planning_handler::delete_ce_planning,
        planning_handler::populate_yearly_planning,
        planning_handler::update_planning_shift_type,
        planning_handler::bulk_update_planning,
        // Employee endpoints
        employee_handler::list_employees,
        employee_handler::employee_skills,
        employee_handler::add_employee,
        employee_handler::update_employee,
        employee_handler::delete_employee,
    ),
    components(
        schemas(
            // Auth types
            UserRole,
            auth_handler::LoginRequest,
            auth_handler::VerifyTokenResponse,
            LoginResponse,
            // Planning types
            Shift,
            PlanningStatus,
            ShiftType,
            Summary,
            Planning,
            PlanningView,
            AddPlanning,
            AddCePlanning,
            UpdatePlanning,
            UpdateCeStatus,
            PopulateYear,
            ShiftTypeChange,
            BulkReassign,
            planning_handler::ShiftTypeResponse,
            // Employee types
            Skill,
            Employee,
            EmployeeListing,
            CreateEmployee,
            UpdateEmployee,
            SwapRequiredResponse,
            // Shared
            MessageResponse,
            CountResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Login and token verification"),
        (name = "Planning", description = "Planning entries and rotation generation"),
        (name = "Employees", description = "Staff records and assignment changes")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /login"))
                        .build(),
                ),
            );
        }
    }
}
