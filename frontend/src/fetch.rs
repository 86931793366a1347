//! [`TodoApi`] over the browser's `fetch`.

use client::api::{check_status, decode_response, encode_request};
use client::{ApiError, ApiRoutes, TodoApi};
use shared::{
    CreateProjectRequest, CreateTaskRequest, Project, Stats, Task, UpdateProjectRequest,
    UpdateTaskRequest,
};
use uuid::Uuid;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response};

/// Backend origin baked in at build time. Unset means same origin.
const BACKEND_URL: Option<&str> = option_env!("TODOMASTER_BACKEND_URL");

#[derive(Debug, Clone)]
pub struct FetchApi {
    routes: ApiRoutes,
}

impl Default for FetchApi {
    fn default() -> Self {
        Self::new(BACKEND_URL.unwrap_or_default())
    }
}

fn network(err: JsValue) -> ApiError {
    ApiError::Network(format!("{err:?}"))
}

impl FetchApi {
    pub fn new(backend_url: &str) -> Self {
        Self {
            routes: ApiRoutes::new(backend_url),
        }
    }

    async fn send(
        &self,
        method: &str,
        url: &str,
        body: Option<String>,
    ) -> Result<(u16, String), ApiError> {
        tracing::debug!(method, url, "request");

        let opts = RequestInit::new();
        opts.set_method(method);
        if let Some(body) = &body {
            opts.set_body(&JsValue::from_str(body));
        }

        let request = Request::new_with_str_and_init(url, &opts).map_err(network)?;
        if body.is_some() {
            request
                .headers()
                .set("Content-Type", "application/json")
                .map_err(network)?;
        }

        let window = web_sys::window().ok_or_else(|| ApiError::Network("no window".to_string()))?;
        let response: Response = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(network)?
            .into();

        let status = response.status();
        let text = JsFuture::from(response.text().map_err(network)?)
            .await
            .map_err(network)?
            .as_string()
            .unwrap_or_default();

        Ok((status, text))
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        let (status, text) = self.send("GET", url, None).await?;
        decode_response(status, &text)
    }

    async fn write<B, T>(&self, method: &str, url: &str, body: &B) -> Result<T, ApiError>
    where
        B: serde::Serialize,
        T: serde::de::DeserializeOwned,
    {
        let (status, text) = self.send(method, url, Some(encode_request(body)?)).await?;
        decode_response(status, &text)
    }

    async fn delete(&self, url: &str) -> Result<(), ApiError> {
        let (status, text) = self.send("DELETE", url, None).await?;
        check_status(status, &text)
    }
}

impl TodoApi for FetchApi {
    async fn get_stats(&self) -> Result<Stats, ApiError> {
        self.get(&self.routes.stats()).await
    }

    async fn list_tasks(&self) -> Result<Vec<Task>, ApiError> {
        self.get(&self.routes.tasks()).await
    }

    async fn list_projects(&self) -> Result<Vec<Project>, ApiError> {
        self.get(&self.routes.projects()).await
    }

    async fn create_task(&self, request: &CreateTaskRequest) -> Result<Task, ApiError> {
        self.write("POST", &self.routes.tasks(), request).await
    }

    async fn update_task(&self, id: Uuid, request: &UpdateTaskRequest) -> Result<Task, ApiError> {
        self.write("PUT", &self.routes.task(id), request).await
    }

    async fn delete_task(&self, id: Uuid) -> Result<(), ApiError> {
        self.delete(&self.routes.task(id)).await
    }

    async fn create_project(&self, request: &CreateProjectRequest) -> Result<Project, ApiError> {
        self.write("POST", &self.routes.projects(), request).await
    }

    async fn update_project(
        &self,
        id: Uuid,
        request: &UpdateProjectRequest,
    ) -> Result<Project, ApiError> {
        self.write("PUT", &self.routes.project(id), request).await
    }

    async fn delete_project(&self, id: Uuid) -> Result<(), ApiError> {
        self.delete(&self.routes.project(id)).await
    }
}
