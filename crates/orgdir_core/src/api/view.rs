//! Serializable results with optional relationship fields.
//!
//! A relationship field is omitted when not selected. A selected
//! `department` that resolves to nothing serializes as `null`.

use crate::model::department::Department;
use crate::model::employee::Employee;
use serde::Serialize;

/// Which relationship fields the caller asked for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    /// Expand `Employee.department`.
    pub department: bool,
    /// Expand `Department.employees`.
    pub employees: bool,
}

impl Selection {
    /// Scalar fields only.
    pub fn scalars() -> Self {
        Self::default()
    }

    /// Every relationship field.
    pub fn all() -> Self {
        Self {
            department: true,
            employees: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DepartmentView {
    #[serde(flatten)]
    pub department: Department,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employees: Option<Vec<Employee>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmployeeView {
    #[serde(flatten)]
    pub employee: Employee,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<Option<Department>>,
}

/// Result of one executed operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Response {
    Departments(Vec<DepartmentView>),
    Employees(Vec<EmployeeView>),
    Department(DepartmentView),
    Employee(EmployeeView),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bo() -> Employee {
        Employee {
            id: 3,
            name: "Bo".to_string(),
            age: 41,
            gender: "M".to_string(),
            salary: 700,
            dept_id: 9,
        }
    }

    #[test]
    fn unselected_relationship_is_omitted() {
        let view = EmployeeView {
            employee: bo(),
            department: None,
        };
        let value = serde_json::to_value(view).unwrap();
        assert!(value.get("department").is_none());
    }

    #[test]
    fn selected_dangling_department_is_null() {
        let view = EmployeeView {
            employee: bo(),
            department: Some(None),
        };
        let value = serde_json::to_value(view).unwrap();
        assert_eq!(
            value,
            json!({
                "id": 3, "name": "Bo", "age": 41, "gender": "M",
                "salary": 700, "deptId": 9, "department": null
            })
        );
    }
}
