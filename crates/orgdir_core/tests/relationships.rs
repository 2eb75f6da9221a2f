mod common;

use common::{ann, employee, eng};
use orgdir_core::{
    Department, DirectoryService, Employee, EmployeeJoin, EntityRepository, IdStrategy,
    MemoryCollection,
};
use std::sync::Arc;

fn service_with(
    departments: Vec<Department>,
    employees: Vec<Employee>,
    join: EmployeeJoin,
) -> DirectoryService {
    DirectoryService::new(
        EntityRepository::new(Arc::new(MemoryCollection::with_records(departments))),
        EntityRepository::new(Arc::new(MemoryCollection::with_records(employees))),
        IdStrategy::Sequence,
        join,
    )
}

#[tokio::test]
async fn employee_resolves_its_single_department() {
    let service = service_with(
        vec![eng(), Department::new(2, "Ops")],
        vec![employee(5, "Cy", 2)],
        EmployeeJoin::LiteralId,
    );

    let employees = service.list_employees().await.unwrap();
    let dept = service.department_of(&employees[0]).await.unwrap();
    assert_eq!(dept, Some(Department::new(2, "Ops")));
}

#[tokio::test]
async fn dangling_dept_id_resolves_to_none() {
    let service = service_with(vec![eng()], vec![employee(1, "Di", 77)], EmployeeJoin::LiteralId);

    let employees = service.list_employees().await.unwrap();
    assert_eq!(service.department_of(&employees[0]).await.unwrap(), None);
}

#[tokio::test]
async fn duplicate_department_ids_resolve_to_first_match() {
    let service = service_with(
        vec![Department::new(1, "Eng"), Department::new(1, "Eng Two")],
        vec![ann(1)],
        EmployeeJoin::LiteralId,
    );

    let dept = service.department_of(&ann(1)).await.unwrap();
    assert_eq!(dept, Some(Department::new(1, "Eng")));
}

#[tokio::test]
async fn literal_join_matches_when_ids_coincide() {
    let service = service_with(vec![eng()], vec![ann(1)], EmployeeJoin::LiteralId);

    assert_eq!(service.department_of(&ann(1)).await.unwrap(), Some(eng()));
    assert_eq!(service.employees_of(&eng()).await.unwrap(), vec![ann(1)]);
}

#[tokio::test]
async fn literal_join_misses_member_whose_id_differs() {
    let service = service_with(vec![eng()], vec![ann(2)], EmployeeJoin::LiteralId);

    // Ann still points at Eng, but the department-side lookup keys on `id`.
    assert_eq!(service.department_of(&ann(2)).await.unwrap(), Some(eng()));
    assert!(service.employees_of(&eng()).await.unwrap().is_empty());
}

#[tokio::test]
async fn literal_join_returns_non_member_sharing_the_id() {
    let service = service_with(vec![eng()], vec![employee(1, "Ed", 3)], EmployeeJoin::LiteralId);

    let members = service.employees_of(&eng()).await.unwrap();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].dept_id, 3);
}

#[tokio::test]
async fn dept_id_join_returns_actual_members() {
    let service = service_with(
        vec![eng()],
        vec![ann(2), employee(3, "Bo", 1), employee(1, "Ed", 3)],
        EmployeeJoin::DeptId,
    );

    let names: Vec<_> = service
        .employees_of(&eng())
        .await
        .unwrap()
        .into_iter()
        .map(|emp| emp.name)
        .collect();
    assert_eq!(names, ["Ann", "Bo"]);
}

#[tokio::test]
async fn department_without_employees_resolves_to_empty() {
    let service = service_with(vec![eng()], Vec::new(), EmployeeJoin::DeptId);
    assert!(service.employees_of(&eng()).await.unwrap().is_empty());
}
