//! Functions
//!
//! Cloud functions with their deployments, executions and variables.

use crate::api::{route, Client, Params};
use crate::error::Result;
use reqwest::Method;
use serde::{Deserialize, Serialize};

/// Environment variable of a function
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Variable {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(rename = "$createdAt")]
    pub created_at: String,
    #[serde(rename = "$updatedAt")]
    pub updated_at: String,
    pub key: String,
    pub value: String,
    pub function_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FunctionObject {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(rename = "$createdAt")]
    pub created_at: String,
    #[serde(rename = "$updatedAt")]
    pub updated_at: String,
    pub name: String,
    /// Roles allowed to execute the function
    pub execute: Vec<String>,
    pub enabled: bool,
    #[serde(alias = "variable")]
    pub vars: Vec<Variable>,
    pub runtime: String,
    /// Active deployment id
    pub deployment: String,
    pub events: Vec<String>,
    /// Cron expression
    pub schedule: String,
    pub schedule_next: String,
    pub schedule_previous: String,
    /// Seconds
    pub timeout: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DeploymentObject {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(rename = "$createdAt")]
    pub created_at: String,
    #[serde(rename = "$updatedAt")]
    pub updated_at: String,
    pub resource_id: String,
    pub resource_type: String,
    pub entrypoint: String,
    /// Bytes
    pub size: u64,
    pub build_id: String,
    pub activate: bool,
    /// `processing`, `building`, `ready` or `failed`
    pub status: String,
    pub build_stdout: String,
    pub build_stderr: String,
    pub build_time: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExecutionObject {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(rename = "$createdAt")]
    pub created_at: String,
    #[serde(rename = "$updatedAt")]
    pub updated_at: String,
    #[serde(rename = "$permissions", alias = "permissions")]
    pub permissions: Vec<String>,
    pub function_id: String,
    /// `http`, `schedule` or `event`
    pub trigger: String,
    /// `waiting`, `processing`, `completed` or `failed`
    pub status: String,
    pub status_code: u16,
    pub response: String,
    pub stdout: String,
    pub stderr: String,
    /// Seconds
    pub duration: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FunctionList {
    pub total: u64,
    pub functions: Vec<FunctionObject>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeploymentList {
    pub total: u64,
    pub deployments: Vec<DeploymentObject>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutionList {
    pub total: u64,
    pub executions: Vec<ExecutionObject>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VariableList {
    pub total: u64,
    pub variables: Vec<Variable>,
}

/// Functions service
#[derive(Clone, Debug)]
pub struct Functions {
    client: Client,
}

impl Functions {
    pub fn new(client: &Client) -> Self {
        Self {
            client: client.clone(),
        }
    }

    pub async fn list_functions(
        &self,
        search: Option<&str>,
        queries: &[&str],
    ) -> Result<FunctionList> {
        let params = Params::new()
            .insert_opt("search", search)
            .insert("queries", queries);
        self.client.request(Method::GET, "/functions", params).await
    }

    pub async fn get_function(&self, function_id: &str) -> Result<FunctionObject> {
        let path = function_path("/functions/{functionId}", function_id)?;
        self.client.request(Method::GET, &path, Params::new()).await
    }

    pub async fn delete_function(&self, function_id: &str) -> Result<()> {
        let path = function_path("/functions/{functionId}", function_id)?;
        self.client.request_empty(Method::DELETE, &path, Params::new()).await
    }

    // =========================================================================
    // Deployments
    // =========================================================================

    pub async fn list_deployments(
        &self,
        function_id: &str,
        search: Option<&str>,
        queries: &[&str],
    ) -> Result<DeploymentList> {
        let path = function_path("/functions/{functionId}/deployments", function_id)?;
        let params = Params::new()
            .insert_opt("search", search)
            .insert("queries", queries);
        self.client.request(Method::GET, &path, params).await
    }

    pub async fn get_deployment(
        &self,
        function_id: &str,
        deployment_id: &str,
    ) -> Result<DeploymentObject> {
        let path = route::render(
            "/functions/{functionId}/deployments/{deploymentId}",
            &[("functionId", function_id), ("deploymentId", deployment_id)],
        )?;
        self.client.request(Method::GET, &path, Params::new()).await
    }

    pub async fn delete_deployment(&self, function_id: &str, deployment_id: &str) -> Result<()> {
        let path = route::render(
            "/functions/{functionId}/deployments/{deploymentId}",
            &[("functionId", function_id), ("deploymentId", deployment_id)],
        )?;
        self.client.request_empty(Method::DELETE, &path, Params::new()).await
    }

    // =========================================================================
    // Executions
    // =========================================================================

    pub async fn list_executions(
        &self,
        function_id: &str,
        search: Option<&str>,
        queries: &[&str],
    ) -> Result<ExecutionList> {
        let path = function_path("/functions/{functionId}/executions", function_id)?;
        let params = Params::new()
            .insert_opt("search", search)
            .insert("queries", queries);
        self.client.request(Method::GET, &path, params).await
    }

    /// Trigger a function. With `run_async` the call returns as soon as the
    /// execution is queued.
    pub async fn create_execution(
        &self,
        function_id: &str,
        body: Option<&str>,
        run_async: bool,
    ) -> Result<ExecutionObject> {
        let path = function_path("/functions/{functionId}/executions", function_id)?;
        let params = Params::new()
            .insert_opt("body", body)
            .insert("async", run_async);
        self.client.request(Method::POST, &path, params).await
    }

    pub async fn get_execution(
        &self,
        function_id: &str,
        execution_id: &str,
    ) -> Result<ExecutionObject> {
        let path = route::render(
            "/functions/{functionId}/executions/{executionId}",
            &[("functionId", function_id), ("executionId", execution_id)],
        )?;
        self.client.request(Method::GET, &path, Params::new()).await
    }

    // =========================================================================
    // Variables
    // =========================================================================

    pub async fn list_variables(
        &self,
        function_id: &str,
        search: Option<&str>,
        queries: &[&str],
    ) -> Result<VariableList> {
        let path = function_path("/functions/{functionId}/variables", function_id)?;
        let params = Params::new()
            .insert_opt("search", search)
            .insert("queries", queries);
        self.client.request(Method::GET, &path, params).await
    }

    pub async fn create_variable(&self, function_id: &str, key: &str, value: &str) -> Result<Variable> {
        let path = function_path("/functions/{functionId}/variables", function_id)?;
        let params = Params::new().insert("key", key).insert("value", value);
        self.client.request(Method::POST, &path, params).await
    }

    pub async fn get_variable(&self, function_id: &str, variable_id: &str) -> Result<Variable> {
        let path = variable_path(function_id, variable_id)?;
        self.client.request(Method::GET, &path, Params::new()).await
    }

    pub async fn update_variable(
        &self,
        function_id: &str,
        variable_id: &str,
        key: &str,
        value: Option<&str>,
    ) -> Result<Variable> {
        let path = variable_path(function_id, variable_id)?;
        let params = Params::new().insert("key", key).insert_opt("value", value);
        self.client.request(Method::PUT, &path, params).await
    }

    pub async fn delete_variable(&self, function_id: &str, variable_id: &str) -> Result<()> {
        let path = variable_path(function_id, variable_id)?;
        self.client.request_empty(Method::DELETE, &path, Params::new()).await
    }
}

fn function_path(template: &str, function_id: &str) -> Result<String> {
    route::render(template, &[("functionId", function_id)])
}

fn variable_path(function_id: &str, variable_id: &str) -> Result<String> {
    route::render(
        "/functions/{functionId}/variables/{variableId}",
        &[("functionId", function_id), ("variableId", variable_id)],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::decode;

    #[test]
    fn test_function_decodes_legacy_variable_key() {
        let function: FunctionObject = decode(
            br#"{"$id":"f1","runtime":"node-18.0","timeout":15,"variable":[{"key":"A","value":"1"}]}"#,
        )
        .unwrap();
        assert_eq!(function.runtime, "node-18.0");
        assert_eq!(function.timeout, 15);
        assert_eq!(function.vars.len(), 1);
        assert_eq!(function.vars[0].key, "A");
    }

    #[test]
    fn test_execution_decodes_numeric_fields() {
        let execution: ExecutionObject = decode(
            br#"{"$id":"e1","functionId":"f1","status":"completed","statusCode":200,"duration":0.25}"#,
        )
        .unwrap();
        assert_eq!(execution.status_code, 200);
        assert_eq!(execution.duration, 0.25);
    }

    #[test]
    fn test_execution_accepts_either_permissions_key() {
        let legacy: ExecutionObject =
            decode(br#"{"$id":"e1","permissions":["read(\"any\")"]}"#).unwrap();
        let current: ExecutionObject =
            decode(br#"{"$id":"e1","$permissions":["read(\"any\")"]}"#).unwrap();
        assert_eq!(legacy.permissions, vec!["read(\"any\")"]);
        assert_eq!(legacy, current);
    }

    #[test]
    fn test_variables_path_substitutes_function_id() {
        assert_eq!(
            function_path("/functions/{functionId}/variables", "f1").unwrap(),
            "/functions/f1/variables"
        );
    }
}
