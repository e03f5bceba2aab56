//! Planning engine tests against an in-memory SQLite database.

mod common;

use std::sync::Arc;

use chrono::{Datelike, Weekday};

use common::{date, Fixture};
use shift_planner::domain::{
    AddCePlanning, AddPlanning, AssignmentOutcome, BulkReassign, Planning, PlanningStatus, Shift,
    ShiftTypeChange, UpdateCeStatus, UpdateEmployee, UpdatePlanning,
};
use shift_planner::errors::AppError;
use shift_planner::infra::UnitOfWork;
use shift_planner::services::{scheduling, EmployeeService, PlanningManager, PlanningService};

fn planning_service(fx: &Fixture) -> PlanningManager<shift_planner::infra::Persistence> {
    PlanningManager::new(Arc::clone(&fx.uow))
}

fn assignment(raw_date: &str, shift: Shift, sector_id: i32, employee_id: i32) -> AddPlanning {
    AddPlanning {
        date: raw_date.to_string(),
        week: None,
        shift,
        sector_id,
        employee_id,
        status: None,
    }
}

fn ce_slot(raw_date: &str, shift: Shift, ce_id: i32) -> AddCePlanning {
    AddCePlanning {
        date: raw_date.to_string(),
        week: None,
        shift,
        ce_id,
        status: None,
    }
}

async fn row(fx: &Fixture, id: i32) -> Planning {
    fx.uow.plannings().get(id).await.unwrap()
}

async fn week_rows(fx: &Fixture, week: i32, year: i32) -> Vec<Planning> {
    fx.uow.plannings().list_week(week, Some(year)).await.unwrap()
}

// =============================================================================
// Single entries
// =============================================================================

#[tokio::test]
async fn test_add_planning_copies_employee_ce_and_derives_week() {
    let fx = Fixture::new().await;
    let ce = fx.ce("CE 1").await;
    let sector = fx.sector("Control room").await;
    let emp = fx.employee("Ada", Some(ce), Some(sector)).await;

    let created = planning_service(&fx)
        .add_planning(assignment("2099-03-03", Shift::Afternoon, sector, emp))
        .await
        .unwrap();

    assert_eq!(created.ce_id, Some(ce));
    assert_eq!(created.sector_id, Some(sector));
    assert_eq!(created.employee_id, Some(emp));
    assert_eq!(created.week, 10);
    assert_eq!(created.year, 2099);
    assert_eq!(created.status, PlanningStatus::Scheduled);
}

#[tokio::test]
async fn test_add_planning_validation() {
    let fx = Fixture::new().await;
    let sector = fx.sector("Control room").await;
    let emp = fx.employee("Ada", None, Some(sector)).await;
    let service = planning_service(&fx);

    let bad_date = service
        .add_planning(assignment("03/03/2099", Shift::Morning, sector, emp))
        .await;
    assert!(matches!(bad_date, Err(AppError::Validation(_))));

    let mut wrong_week = assignment("2099-03-03", Shift::Morning, sector, emp);
    wrong_week.week = Some(11);
    assert!(matches!(
        service.add_planning(wrong_week).await,
        Err(AppError::Validation(_))
    ));

    let unknown_employee = service
        .add_planning(assignment("2099-03-03", Shift::Morning, sector, 999))
        .await;
    assert!(matches!(unknown_employee, Err(AppError::NotFound(_))));

    let unknown_sector = service
        .add_planning(assignment("2099-03-03", Shift::Morning, 999, emp))
        .await;
    assert!(matches!(unknown_sector, Err(AppError::NotFound(_))));

    assert_eq!(fx.uow.plannings().count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_add_ce_planning_cascades_to_attached_employees() {
    let fx = Fixture::new().await;
    let ce = fx.ce("CE 1").await;
    let sector_a = fx.sector("A").await;
    let sector_b = fx.sector("B").await;
    let ada = fx.employee("Ada", Some(ce), Some(sector_a)).await;
    let bob = fx.employee("Bob", Some(ce), Some(sector_b)).await;
    fx.employee("Unattached", None, Some(sector_a)).await;

    let slot = planning_service(&fx)
        .add_ce_planning(ce_slot("2099-03-02", Shift::Night, ce))
        .await
        .unwrap();
    assert!(slot.is_ce_slot());

    let rows = week_rows(&fx, 10, 2099).await;
    assert_eq!(rows.len(), 3);
    for (employee, sector) in [(ada, sector_a), (bob, sector_b)] {
        let staff_row = rows
            .iter()
            .find(|r| r.employee_id == Some(employee))
            .expect("cascaded row");
        assert_eq!(staff_row.ce_id, Some(ce));
        assert_eq!(staff_row.sector_id, Some(sector));
        assert_eq!(staff_row.shift, Shift::Night);
    }
}

#[tokio::test]
async fn test_update_ce_status_leaves_employee_rows_alone() {
    let fx = Fixture::new().await;
    let ce = fx.ce("CE 1").await;
    let sector = fx.sector("A").await;
    let emp = fx.employee("Ada", Some(ce), Some(sector)).await;
    let service = planning_service(&fx);

    let slot = service
        .add_ce_planning(ce_slot("2099-03-02", Shift::Morning, ce))
        .await
        .unwrap();
    let updated = service
        .update_ce_status(slot.id, UpdateCeStatus { status: PlanningStatus::Training })
        .await
        .unwrap();
    assert_eq!(updated.status, PlanningStatus::Training);

    let staff_row = week_rows(&fx, 10, 2099)
        .await
        .into_iter()
        .find(|r| r.employee_id == Some(emp))
        .unwrap();
    assert_eq!(staff_row.status, PlanningStatus::Scheduled);

    let not_a_slot = service
        .update_ce_status(staff_row.id, UpdateCeStatus { status: PlanningStatus::Training })
        .await;
    assert!(matches!(not_a_slot, Err(AppError::Validation(_))));
}

// =============================================================================
// Substitution
// =============================================================================

struct SubstitutionSetup {
    fx: Fixture,
    substitute: i32,
    target_row: i32,
    held_row: i32,
}

async fn substitution_setup() -> SubstitutionSetup {
    let fx = Fixture::new().await;
    let ce1 = fx.ce("CE 1").await;
    let ce2 = fx.ce("CE 2").await;
    let sector = fx.sector("A").await;
    let absent = fx.employee("Absent", Some(ce1), Some(sector)).await;
    let substitute = fx.employee("Substitute", Some(ce2), Some(sector)).await;
    let service = planning_service(&fx);

    let target_row = service
        .add_planning(assignment("2099-03-03", Shift::Morning, sector, absent))
        .await
        .unwrap()
        .id;
    let held_row = service
        .add_planning(assignment("2099-03-03", Shift::Morning, sector, substitute))
        .await
        .unwrap()
        .id;

    SubstitutionSetup {
        fx,
        substitute,
        target_row,
        held_row,
    }
}

#[tokio::test]
async fn test_substitute_is_evicted_from_conflicting_slot() {
    let s = substitution_setup().await;

    let updated = planning_service(&s.fx)
        .update_planning(
            s.target_row,
            UpdatePlanning {
                status: PlanningStatus::AbsentUnplanned,
                substitute_id: Some(s.substitute),
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.status, PlanningStatus::AbsentUnplanned);
    assert_eq!(updated.substitute_id, Some(s.substitute));

    let evicted = row(&s.fx, s.held_row).await;
    assert_eq!(evicted.employee_id, None);
    assert_eq!(evicted.status, PlanningStatus::Unassigned);
    assert!(!evicted.is_ce_slot());
}

#[tokio::test]
async fn test_substitution_rolls_back_when_transaction_fails() {
    let s = substitution_setup().await;
    let (target, substitute) = (s.target_row, s.substitute);

    let result = s
        .fx
        .uow
        .transaction(|ctx| {
            Box::pin(async move {
                scheduling::update_planning(
                    &ctx,
                    target,
                    PlanningStatus::AbsentPlanned,
                    Some(substitute),
                )
                .await?;
                Err::<(), _>(AppError::internal("forced failure after eviction"))
            })
        })
        .await;
    assert!(result.is_err());

    let held = row(&s.fx, s.held_row).await;
    assert_eq!(held.employee_id, Some(s.substitute));
    assert_eq!(held.status, PlanningStatus::Scheduled);

    let target_row = row(&s.fx, s.target_row).await;
    assert_eq!(target_row.substitute_id, None);
    assert_eq!(target_row.status, PlanningStatus::Scheduled);
}

#[tokio::test]
async fn test_update_planning_rejects_unassigned_and_unknown_substitute() {
    let s = substitution_setup().await;
    let service = planning_service(&s.fx);

    let unassigned = service
        .update_planning(
            s.target_row,
            UpdatePlanning {
                status: PlanningStatus::Unassigned,
                substitute_id: None,
            },
        )
        .await;
    assert!(matches!(unassigned, Err(AppError::Validation(_))));

    let unknown = service
        .update_planning(
            s.target_row,
            UpdatePlanning {
                status: PlanningStatus::Training,
                substitute_id: Some(999),
            },
        )
        .await;
    assert!(matches!(unknown, Err(AppError::NotFound(_))));

    let missing = service
        .update_planning(
            999,
            UpdatePlanning {
                status: PlanningStatus::Training,
                substitute_id: None,
            },
        )
        .await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));
}

// =============================================================================
// Deletion
// =============================================================================

#[tokio::test]
async fn test_delete_ce_planning_removes_rows_on_the_same_slot_only() {
    let fx = Fixture::new().await;
    let ce = fx.ce("CE 1").await;
    let sector = fx.sector("A").await;
    fx.employee("Ada", Some(ce), Some(sector)).await;
    fx.employee("Bob", Some(ce), Some(sector)).await;
    let service = planning_service(&fx);

    let morning = service
        .add_ce_planning(ce_slot("2099-03-02", Shift::Morning, ce))
        .await
        .unwrap();
    service
        .add_ce_planning(ce_slot("2099-03-02", Shift::Afternoon, ce))
        .await
        .unwrap();

    let cascaded = service.delete_ce_planning(morning.id).await.unwrap();
    assert_eq!(cascaded, 2);

    let rows = week_rows(&fx, 10, 2099).await;
    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|r| r.shift == Shift::Afternoon));
}

#[tokio::test]
async fn test_delete_planning_refuses_ce_slots() {
    let fx = Fixture::new().await;
    let ce = fx.ce("CE 1").await;
    let service = planning_service(&fx);

    let slot = service
        .add_ce_planning(ce_slot("2099-03-02", Shift::Morning, ce))
        .await
        .unwrap();

    assert!(matches!(
        service.delete_planning(slot.id).await,
        Err(AppError::Validation(_))
    ));
    assert!(matches!(
        service.delete_planning(999).await,
        Err(AppError::NotFound(_))
    ));
    assert_eq!(fx.uow.plannings().count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_refilled_evicted_row_goes_with_its_ce_slot() {
    let s = substitution_setup().await;
    let ce1 = row(&s.fx, s.target_row).await.ce_id.unwrap();
    let sector = row(&s.fx, s.held_row).await.sector_id.unwrap();
    let other = s.fx.employee("Other", None, Some(sector)).await;
    let service = planning_service(&s.fx);

    let slot = service
        .add_ce_planning(ce_slot("2099-03-03", Shift::Morning, ce1))
        .await
        .unwrap();
    service
        .update_planning(
            s.target_row,
            UpdatePlanning {
                status: PlanningStatus::AbsentUnplanned,
                substitute_id: Some(s.substitute),
            },
        )
        .await
        .unwrap();
    let refilled = service
        .update_planning(
            s.held_row,
            UpdatePlanning {
                status: PlanningStatus::Scheduled,
                substitute_id: Some(other),
            },
        )
        .await
        .unwrap();

    assert_eq!(refilled.employee_id, None);
    assert!(!refilled.is_ce_slot());
    assert!(matches!(
        service.delete_ce_planning(s.held_row).await,
        Err(AppError::Validation(_))
    ));

    // target, refilled row and the cascaded row for the CE 1 employee
    let cascaded = service.delete_ce_planning(slot.id).await.unwrap();
    assert_eq!(cascaded, 3);
    assert_eq!(s.fx.uow.plannings().count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_delete_ce_planning_rolls_back_when_transaction_fails() {
    let fx = Fixture::new().await;
    let ce = fx.ce("CE 1").await;
    let sector = fx.sector("A").await;
    let ada = fx.employee("Ada", Some(ce), Some(sector)).await;
    let bob = fx.employee("Bob", Some(ce), Some(sector)).await;
    let slot = planning_service(&fx)
        .add_ce_planning(ce_slot("2099-03-02", Shift::Morning, ce))
        .await
        .unwrap()
        .id;

    let result = fx
        .uow
        .transaction(|ctx| {
            Box::pin(async move {
                scheduling::delete_ce_planning(&ctx, slot).await?;
                Err::<(), _>(AppError::internal("forced failure after cascade"))
            })
        })
        .await;
    assert!(result.is_err());

    assert!(row(&fx, slot).await.is_ce_slot());
    let mut staff: Vec<i32> = week_rows(&fx, 10, 2099)
        .await
        .into_iter()
        .filter_map(|r| r.employee_id)
        .collect();
    staff.sort_unstable();
    assert_eq!(staff, vec![ada, bob]);
}

// =============================================================================
// Assignment changes
// =============================================================================

#[tokio::test]
async fn test_swap_requires_confirmation_then_exchanges_schedules() {
    let fx = Fixture::new().await;
    let ce1 = fx.ce("CE 1").await;
    let ce2 = fx.ce("CE 2").await;
    let sector_a = fx.sector("A").await;
    let sector_b = fx.sector("B").await;
    let ada = fx.employee("Ada", Some(ce1), Some(sector_a)).await;
    let bob = fx.employee("Bob", Some(ce2), Some(sector_b)).await;
    let service = planning_service(&fx);

    service
        .add_ce_planning(ce_slot("2099-03-02", Shift::Morning, ce1))
        .await
        .unwrap();
    service
        .add_ce_planning(ce_slot("2099-03-02", Shift::Night, ce2))
        .await
        .unwrap();
    let past = service
        .add_planning(assignment("2000-01-03", Shift::Morning, sector_a, ada))
        .await
        .unwrap();

    let request = UpdateEmployee {
        ce_id: Some(ce2),
        sector_id: Some(sector_b),
        ..Default::default()
    };

    // Occupied target without swap: nothing changes
    match fx.employees.update_employee(ada, request.clone()).await.unwrap() {
        AssignmentOutcome::SwapRequired { existing } => assert_eq!(existing.id, bob),
        other => panic!("expected swap request, got {:?}", other),
    }
    let unchanged = fx.uow.employees().get(ada).await.unwrap();
    assert_eq!(unchanged.ce_id, Some(ce1));

    let outcome = fx
        .employees
        .update_employee(ada, UpdateEmployee { swap: true, ..request })
        .await
        .unwrap();
    let AssignmentOutcome::Updated(ada_now) = outcome else {
        panic!("expected update");
    };
    assert_eq!((ada_now.ce_id, ada_now.sector_id), (Some(ce2), Some(sector_b)));

    let bob_now = fx.uow.employees().get(bob).await.unwrap();
    assert_eq!((bob_now.ce_id, bob_now.sector_id), (Some(ce1), Some(sector_a)));

    let future = week_rows(&fx, 10, 2099).await;
    let ada_row = future.iter().find(|r| r.employee_id == Some(ada)).unwrap();
    assert_eq!((ada_row.ce_id, ada_row.sector_id), (Some(ce2), Some(sector_b)));
    assert_eq!(ada_row.shift, Shift::Night);

    let bob_row = future.iter().find(|r| r.employee_id == Some(bob)).unwrap();
    assert_eq!((bob_row.ce_id, bob_row.sector_id), (Some(ce1), Some(sector_a)));
    assert_eq!(bob_row.shift, Shift::Morning);

    // History stays where it was
    let past_row = row(&fx, past.id).await;
    assert_eq!(past_row.ce_id, Some(ce1));
    assert_eq!(past_row.sector_id, Some(sector_a));
}

#[tokio::test]
async fn test_rename_does_not_trigger_occupant_check() {
    let fx = Fixture::new().await;
    let ce = fx.ce("CE 1").await;
    let sector = fx.sector("A").await;
    let ada = fx.employee("Ada", Some(ce), Some(sector)).await;
    fx.employee("Twin", Some(ce), Some(sector)).await;

    let outcome = fx
        .employees
        .update_employee(
            ada,
            UpdateEmployee {
                name: Some("Ada L.".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    match outcome {
        AssignmentOutcome::Updated(employee) => assert_eq!(employee.name, "Ada L."),
        other => panic!("expected update, got {:?}", other),
    }
}

#[tokio::test]
async fn test_skill_set_is_replaced_and_unknown_skill_rolls_back() {
    let fx = Fixture::new().await;
    let first = fx.skill("First aid").await;
    let radio = fx.skill("Radio").await;
    let ada = fx.employee("Ada", None, None).await;

    fx.employees
        .update_employee(
            ada,
            UpdateEmployee {
                skills: Some(vec![first, radio, radio]),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(fx.employees.employee_skills(ada).await.unwrap().len(), 2);

    fx.employees
        .update_employee(
            ada,
            UpdateEmployee {
                skills: Some(vec![radio]),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let skills = fx.employees.employee_skills(ada).await.unwrap();
    assert_eq!(skills.iter().map(|s| s.id).collect::<Vec<_>>(), vec![radio]);

    let failed = fx
        .employees
        .update_employee(
            ada,
            UpdateEmployee {
                name: Some("Renamed".to_string()),
                skills: Some(vec![999]),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(failed, Err(AppError::NotFound(_))));
    assert_eq!(fx.uow.employees().get(ada).await.unwrap().name, "Ada");
}

// =============================================================================
// Bulk generation
// =============================================================================

#[tokio::test]
async fn test_populating_twice_doubles_every_row() {
    let fx = Fixture::new().await;
    let ce1 = fx.ce("CE 1").await;
    fx.ce("CE 2").await;
    let sector = fx.sector("A").await;
    fx.employee("Ada", Some(ce1), Some(sector)).await;
    let service = planning_service(&fx);

    // 14 shifts per four-week cycle, 13 cycles: 182 slots per CE.
    // CE 1 doubles them with its employee.
    let created = service.populate_yearly_planning(2099).await.unwrap();
    assert_eq!(created, 182 * 2 + 182);
    assert_eq!(fx.uow.plannings().count().await.unwrap(), created);

    let again = service.populate_yearly_planning(2099).await.unwrap();
    assert_eq!(again, created);
    assert_eq!(fx.uow.plannings().count().await.unwrap(), created * 2);
}

#[tokio::test]
async fn test_populate_rolls_back_when_transaction_fails() {
    let fx = Fixture::new().await;
    let ce1 = fx.ce("CE 1").await;
    let sector = fx.sector("A").await;
    fx.employee("Ada", Some(ce1), Some(sector)).await;
    planning_service(&fx)
        .add_ce_planning(ce_slot("2099-03-02", Shift::Morning, ce1))
        .await
        .unwrap();

    let result = fx
        .uow
        .transaction(|ctx| {
            Box::pin(async move {
                let created = scheduling::populate_yearly_planning(&ctx, 2099).await?;
                assert_eq!(created, 182 * 2);
                Err::<(), _>(AppError::internal("forced failure after population"))
            })
        })
        .await;
    assert!(result.is_err());

    assert_eq!(fx.uow.plannings().count().await.unwrap(), 2);
    assert!(week_rows(&fx, 1, 2099).await.is_empty());
}

#[tokio::test]
async fn test_populated_week_follows_rotation() {
    let fx = Fixture::new().await;
    let ce1 = fx.ce("CE 1").await;
    planning_service(&fx).populate_yearly_planning(2099).await.unwrap();

    // CE 1 in week 1 works mornings Tuesday to Saturday
    let rows = week_rows(&fx, 1, 2099).await;
    assert_eq!(rows.len(), 5);
    assert!(rows.iter().all(|r| r.ce_id == Some(ce1) && r.shift == Shift::Morning));
    let days: Vec<Weekday> = rows.iter().map(|r| r.date.weekday()).collect();
    assert_eq!(
        days,
        vec![Weekday::Tue, Weekday::Wed, Weekday::Thu, Weekday::Fri, Weekday::Sat]
    );
}

#[tokio::test]
async fn test_saturday_only_shift_type_keeps_one_saturday_slot() {
    let fx = Fixture::new().await;
    let mut ces = Vec::new();
    for n in 1..=4 {
        ces.push(fx.ce(&format!("CE {}", n)).await);
    }
    let sector = fx.sector("A").await;
    let ada = fx.employee("Ada", Some(ces[0]), Some(sector)).await;
    let service = planning_service(&fx);

    service
        .add_ce_planning(ce_slot("2099-01-31", Shift::Afternoon, ces[1]))
        .await
        .unwrap();
    service
        .add_ce_planning(ce_slot("2099-02-01", Shift::Night, ces[2]))
        .await
        .unwrap();
    service
        .add_ce_planning(ce_slot("2099-01-30", Shift::Night, ces[3]))
        .await
        .unwrap();

    let rebuild = service
        .update_planning_shift_type(ShiftTypeChange {
            week: 5,
            shift_type: "4x8 N".to_string(),
            year: Some(2099),
        })
        .await
        .unwrap();
    assert_eq!(rebuild.removed, 2);
    assert_eq!(rebuild.created, 2);

    let rows = week_rows(&fx, 5, 2099).await;
    let weekend: Vec<&Planning> = rows
        .iter()
        .filter(|r| matches!(r.date.weekday(), Weekday::Sat | Weekday::Sun))
        .collect();
    assert_eq!(weekend.len(), 2);
    assert!(weekend.iter().all(|r| r.date == date(2099, 1, 31)));
    assert!(weekend.iter().all(|r| r.shift == Shift::Morning && r.ce_id == Some(ces[0])));
    assert_eq!(weekend.iter().filter(|r| r.is_ce_slot()).count(), 1);
    assert!(weekend.iter().any(|r| r.employee_id == Some(ada)));

    // Friday is untouched
    assert!(rows.iter().any(|r| r.date == date(2099, 1, 30)));
}

#[tokio::test]
async fn test_missing_covering_ce_rolls_back_weekend_rebuild() {
    let fx = Fixture::new().await;
    let ce1 = fx.ce("CE 1").await;
    let service = planning_service(&fx);
    service
        .add_ce_planning(ce_slot("2099-01-31", Shift::Morning, ce1))
        .await
        .unwrap();

    // Week 5 Sunday night is covered by CE 3, which does not exist
    let result = service
        .update_planning_shift_type(ShiftTypeChange {
            week: 5,
            shift_type: "4x8 L".to_string(),
            year: Some(2099),
        })
        .await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
    assert_eq!(week_rows(&fx, 5, 2099).await.len(), 1);

    let unknown = service
        .update_planning_shift_type(ShiftTypeChange {
            week: 5,
            shift_type: "5x8".to_string(),
            year: Some(2099),
        })
        .await;
    assert!(matches!(unknown, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn test_bulk_update_moves_rows_from_start_date() {
    let fx = Fixture::new().await;
    let ce1 = fx.ce("CE 1").await;
    let ce2 = fx.ce("CE 2").await;
    let sector_a = fx.sector("A").await;
    let sector_b = fx.sector("B").await;
    let ada = fx.employee("Ada", Some(ce1), Some(sector_a)).await;
    let service = planning_service(&fx);

    let before = service
        .add_planning(assignment("2099-03-02", Shift::Morning, sector_a, ada))
        .await
        .unwrap();
    let after = service
        .add_planning(assignment("2099-03-09", Shift::Morning, sector_a, ada))
        .await
        .unwrap();

    let moved = service
        .bulk_update_planning(BulkReassign {
            employee_id: ada,
            ce_id: ce2,
            sector_id: sector_b,
            start_date: "2099-03-05".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(moved, 1);

    assert_eq!(row(&fx, before.id).await.ce_id, Some(ce1));
    let moved_row = row(&fx, after.id).await;
    assert_eq!((moved_row.ce_id, moved_row.sector_id), (Some(ce2), Some(sector_b)));
}

// =============================================================================
// Weekly view
// =============================================================================

#[tokio::test]
async fn test_weekly_view_orders_by_date_then_shift() {
    let fx = Fixture::new().await;
    let ce = fx.ce("CE 1").await;
    let sector = fx.sector("A").await;
    let ada = fx.employee("Ada", Some(ce), Some(sector)).await;
    let service = planning_service(&fx);

    for (raw, shift) in [
        ("2099-03-03", Shift::Night),
        ("2099-03-02", Shift::Afternoon),
        ("2099-03-03", Shift::Morning),
        ("2099-03-03", Shift::Afternoon),
    ] {
        service
            .add_planning(assignment(raw, shift, sector, ada))
            .await
            .unwrap();
    }

    let views = service.get_plannings(Some(10), Some(2099)).await.unwrap();
    let order: Vec<(String, Shift)> = views.iter().map(|v| (v.day.clone(), v.shift)).collect();
    assert_eq!(
        order,
        vec![
            ("Mo".to_string(), Shift::Afternoon),
            ("Tu".to_string(), Shift::Morning),
            ("Tu".to_string(), Shift::Afternoon),
            ("Tu".to_string(), Shift::Night),
        ]
    );
    assert_eq!(views[0].employee.as_ref().unwrap().name, "Ada");
    assert_eq!(views[0].ce.as_ref().unwrap().name, "CE 1");
    assert_eq!(views[0].sector.as_ref().unwrap().name, "A");
    assert!(views[0].substitute.is_none());

    assert!(matches!(
        service.get_plannings(None, None).await,
        Err(AppError::Validation(_))
    ));
    assert!(matches!(
        service.get_plannings(Some(0), None).await,
        Err(AppError::Validation(_))
    ));
}
