//! Operation names and argument extraction.

use super::{ApiError, ApiResult};
use crate::model::department::NewDepartment;
use crate::model::employee::NewEmployee;
use serde_json::Value;

/// One invocable directory operation with its decoded arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    ListDepartments,
    ListEmployees,
    AddDepartment(NewDepartment),
    AddEmployee(NewEmployee),
}

impl Operation {
    /// Decodes `name` and its arguments.
    ///
    /// Accepts both the query field names (`departments`, `employees`) and the
    /// operation names (`ListDepartments`, `ListEmployees`). List operations
    /// ignore arguments.
    pub fn parse(name: &str, args: Option<&Value>) -> ApiResult<Self> {
        match name {
            "departments" | "ListDepartments" => Ok(Self::ListDepartments),
            "employees" | "ListEmployees" => Ok(Self::ListEmployees),
            "AddDepartment" => {
                let args = Args::new("AddDepartment", args);
                Ok(Self::AddDepartment(NewDepartment {
                    name: args.string("name")?,
                }))
            }
            "AddEmployee" => {
                let args = Args::new("AddEmployee", args);
                Ok(Self::AddEmployee(NewEmployee {
                    name: args.string("name")?,
                    age: args.int("age")?,
                    gender: args.string("gender")?,
                    salary: args.int("salary")?,
                    dept_id: args.int("deptId")?,
                }))
            }
            other => Err(ApiError::UnknownOperation(other.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::ListDepartments => "ListDepartments",
            Self::ListEmployees => "ListEmployees",
            Self::AddDepartment(_) => "AddDepartment",
            Self::AddEmployee(_) => "AddEmployee",
        }
    }

    pub fn is_mutation(&self) -> bool {
        matches!(self, Self::AddDepartment(_) | Self::AddEmployee(_))
    }
}

struct Args<'a> {
    operation: &'static str,
    values: Option<&'a Value>,
}

impl<'a> Args<'a> {
    fn new(operation: &'static str, values: Option<&'a Value>) -> Self {
        Self { operation, values }
    }

    /// JSON `null` counts as absent.
    fn require(&self, key: &'static str) -> ApiResult<&'a Value> {
        self.values
            .and_then(|values| values.get(key))
            .filter(|value| !value.is_null())
            .ok_or(ApiError::MissingRequiredArgument {
                operation: self.operation,
                argument: key,
            })
    }

    fn string(&self, key: &'static str) -> ApiResult<String> {
        self.require(key)?
            .as_str()
            .map(ToOwned::to_owned)
            .ok_or(ApiError::InvalidArgument {
                argument: key,
                expected: "a string",
            })
    }

    fn int(&self, key: &'static str) -> ApiResult<i64> {
        self.require(key)?.as_i64().ok_or(ApiError::InvalidArgument {
            argument: key,
            expected: "an integer",
        })
    }
}
