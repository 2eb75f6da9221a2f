mod common;

use common::{new_employee, GatedCollection};
use orgdir_core::{
    Department, DirectoryConfig, DirectoryService, Employee, EmployeeJoin, EntityRepository,
    IdStrategy, NewDepartment, Operation, Response, Schema, Selection,
};
use std::collections::HashSet;
use std::sync::Arc;

fn gated_service(strategy: IdStrategy) -> DirectoryService {
    DirectoryService::new(
        EntityRepository::in_memory(),
        EntityRepository::<Employee>::new(Arc::new(GatedCollection::new(2))),
        strategy,
        EmployeeJoin::LiteralId,
    )
}

#[tokio::test]
async fn concurrent_count_based_adds_collide_on_id() {
    let service = gated_service(IdStrategy::CountPlusOne);

    let (first, second) = tokio::join!(
        service.add_employee(new_employee("Ann", 1)),
        service.add_employee(new_employee("Bo", 1)),
    );
    assert_eq!(first.unwrap().id, 1);
    assert_eq!(second.unwrap().id, 1);

    let stored: Vec<_> = service
        .list_employees()
        .await
        .unwrap()
        .into_iter()
        .map(|emp| emp.id)
        .collect();
    assert_eq!(stored, [1, 1]);
}

#[tokio::test]
async fn concurrent_sequence_adds_get_distinct_ids() {
    let service = gated_service(IdStrategy::Sequence);

    let (first, second) = tokio::join!(
        service.add_employee(new_employee("Ann", 1)),
        service.add_employee(new_employee("Bo", 1)),
    );
    let ids: HashSet<_> = [first.unwrap().id, second.unwrap().id].into();
    assert_eq!(ids, HashSet::from([1, 2]));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn sequence_ids_stay_unique_across_spawned_tasks() {
    let schema = Schema::open(&DirectoryConfig::default()).await.unwrap();

    let handles: Vec<_> = (0..32)
        .map(|index| {
            let schema = schema.clone();
            tokio::spawn(async move {
                let created = schema
                    .execute(
                        Operation::AddDepartment(NewDepartment::new(format!("dept-{index}"))),
                        Selection::scalars(),
                    )
                    .await
                    .unwrap();
                match created {
                    Response::Department(view) => view.department.id,
                    other => panic!("unexpected response: {other:?}"),
                }
            })
        })
        .collect();

    let mut ids = HashSet::new();
    for handle in handles {
        assert!(ids.insert(handle.await.unwrap()));
    }
    assert_eq!(ids, (1..=32).collect::<HashSet<_>>());
}

#[tokio::test]
async fn sequential_count_based_add_uses_previous_count_plus_one() {
    let service = DirectoryService::in_memory(IdStrategy::CountPlusOne, EmployeeJoin::LiteralId);
    service.add_department(NewDepartment::new("Eng")).await.unwrap();
    service.add_department(NewDepartment::new("Ops")).await.unwrap();

    let before = service.list_departments().await.unwrap();
    let created = service.add_department(NewDepartment::new("X")).await.unwrap();
    let after = service.list_departments().await.unwrap();

    assert_eq!(after.len(), before.len() + 1);
    assert_eq!(created, Department::new(3, "X"));
    assert!(after.contains(&Department::new(3, "X")));
}
