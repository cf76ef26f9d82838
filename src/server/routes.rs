use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde_json::{Value, json};
use std::sync::Arc;

use crate::repository::{
    CategoryQuotes, EnrichedVendor, GroupDetail, GroupSummary, OutreachReceipt, ProjectDetail,
    ProjectWithMetrics, VendorManagement,
};
use crate::server::AppState;
use crate::server::error::{ApiError, ApiResult};
use crate::server::payload::{
    CreateCategoryPayload, CreateProjectPayload, CreateVendorPayload, FromTemplatePayload,
    InvitePayload, SelectQuotePayload, UpdateProjectPayload,
};
use crate::templates::{self, ProjectTemplate};
use crate::{Error, Vendor};

type Body<T> = std::result::Result<Json<T>, JsonRejection>;

pub async fn root() -> Json<Value> {
    Json(json!({"message": "Construction Management API is running"}))
}

// ========== Projects ==========

pub async fn list_projects(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<ProjectWithMetrics>>> {
    Ok(Json(state.repository.projects_with_metrics()?))
}

pub async fn get_project(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> ApiResult<Json<ProjectDetail>> {
    Ok(Json(state.repository.project_detail(id)?))
}

pub async fn create_project(
    State(state): State<Arc<AppState>>,
    body: Body<CreateProjectPayload>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let Json(payload) = body?;
    let new = payload.into_new_project()?;
    let project = state.repository.create_project(new)?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": format!("Project '{}' created successfully", project.name),
            "project": project,
        })),
    ))
}

pub async fn update_project(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
    body: Body<UpdateProjectPayload>,
) -> ApiResult<Json<Value>> {
    let Json(payload) = body?;
    let update = payload.into_update()?;
    let project = state.repository.update_project(id, &update)?;

    Ok(Json(json!({
        "message": "Project updated successfully",
        "project": project,
    })))
}

pub async fn delete_project(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> ApiResult<Json<Value>> {
    let deleted = state.repository.delete_project(id)?;

    Ok(Json(json!({
        "message": format!("Project '{}' deleted successfully", deleted.project.name),
        "deletedProjectId": deleted.project.id,
        "categoriesRemoved": deleted.categories_removed,
        "documentsRemoved": deleted.documents_removed,
    })))
}

pub async fn add_category(
    State(state): State<Arc<AppState>>,
    Path(project_id): Path<u64>,
    body: Body<CreateCategoryPayload>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let Json(payload) = body?;
    let new = payload.into_new_category()?;
    let category = state.repository.add_category_to_project(project_id, new)?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": format!("Category '{}' added successfully", category.name),
            "category": category,
        })),
    ))
}

// ========== Templates ==========

pub async fn list_templates() -> Json<&'static [ProjectTemplate]> {
    Json(templates::catalog())
}

pub async fn create_from_template(
    State(state): State<Arc<AppState>>,
    body: Body<FromTemplatePayload>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let Json(payload) = body?;
    let template = templates::find(&payload.template_name)
        .ok_or_else(|| Error::TemplateNotFound(payload.template_name.clone()))?;

    let merged = template.merge_overrides(payload.project_data);
    let new = CreateProjectPayload::from_map(merged)?.into_new_project()?;
    let instance = state
        .repository
        .create_from_template(template, new, payload.include_categories)?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": format!(
                "Project '{}' created from template '{}'",
                instance.project.name, template.name
            ),
            "project": instance.project,
            "categories": instance.categories,
        })),
    ))
}

// ========== Vendors ==========

pub async fn list_vendors(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Vendor>>> {
    Ok(Json(state.repository.list_vendors()?))
}

pub async fn create_vendor(
    State(state): State<Arc<AppState>>,
    body: Body<CreateVendorPayload>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let Json(payload) = body?;
    let new = payload.into_new_vendor()?;
    let vendor = state.repository.add_vendor(new)?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": format!("Vendor '{}' created successfully", vendor.company_name),
            "vendor": vendor,
        })),
    ))
}

// ========== Categories ==========

/// An unknown category and a category without vendors both answer 404
pub async fn category_vendors(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> ApiResult<Json<Vec<EnrichedVendor>>> {
    let vendors = state.repository.enriched_vendors_for_category(id)?;
    if vendors.is_empty() {
        return Err(ApiError::not_found("Category not found or no vendors available"));
    }
    Ok(Json(vendors))
}

pub async fn category_quotes(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> ApiResult<Json<CategoryQuotes>> {
    Ok(Json(state.repository.category_quotes(id)?))
}

pub async fn vendor_management(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> ApiResult<Json<VendorManagement>> {
    Ok(Json(state.repository.vendor_management(id)?))
}

pub async fn invite_vendors(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
    body: Body<InvitePayload>,
) -> ApiResult<Json<OutreachReceipt>> {
    let Json(payload) = body?;
    Ok(Json(state.repository.invite_vendors(id, &payload.vendor_ids)?))
}

pub async fn contact_vendor(
    State(state): State<Arc<AppState>>,
    Path((id, vendor_id)): Path<(u64, u64)>,
) -> ApiResult<Json<OutreachReceipt>> {
    Ok(Json(state.repository.contact_vendor(id, vendor_id)?))
}

pub async fn select_quote(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
    body: Body<SelectQuotePayload>,
) -> ApiResult<Json<OutreachReceipt>> {
    let Json(payload) = body?;
    Ok(Json(state.repository.select_quote(id, payload.vendor_id)?))
}

// ========== Groups ==========

pub async fn list_groups(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<GroupSummary>>> {
    Ok(Json(state.repository.list_groups()?))
}

pub async fn get_group(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> ApiResult<Json<GroupDetail>> {
    Ok(Json(state.repository.get_group(id)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::Repository;
    use crate::server::router;
    use crate::storage::{Dataset, MemoryStore, Storage};
    use axum::{
        Router,
        body::Body as HttpBody,
        http::{Method, Request},
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn app() -> (Router, Arc<MemoryStore>) {
        app_with(Dataset::default())
    }

    fn app_with(dataset: Dataset) -> (Router, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::with_dataset(dataset));
        let state = Arc::new(AppState {
            repository: Repository::new(store.clone()),
        });
        (router(state), store)
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => request
                .header("content-type", "application/json")
                .body(HttpBody::from(body.to_string()))
                .unwrap(),
            None => request.body(HttpBody::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn create_project(app: &Router) -> u64 {
        let (status, body) = send(
            app,
            Method::POST,
            "/api/projects",
            Some(json!({
                "name": "Harbor Point",
                "client": "Acme Dev",
                "estimatedValue": "2500000",
                "status": "active",
                "city": "Tacoma",
                "state": "WA"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        body["project"]["id"].as_u64().unwrap()
    }

    fn vendor_body(name: &str) -> Value {
        json!({
            "companyName": name,
            "contactInfo": {"representative": "Ana", "email": "ana@v.test", "phone": "555-0150"},
            "address": {"street": "3 Yard Ln", "city": "Kent", "state": "WA", "zipCode": "98032"},
            "specialties": ["Electrical"]
        })
    }

    #[tokio::test]
    async fn test_root() {
        let (app, _) = app();
        let (status, body) = send(&app, Method::GET, "/", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["message"].as_str().unwrap().contains("running"));
    }

    #[tokio::test]
    async fn test_create_project_coerces_string_value() {
        let (app, store) = app();
        let id = create_project(&app).await;

        let stored = store.snapshot().unwrap();
        let project = stored.project(id).unwrap();
        assert_eq!(project.estimated_value, 2_500_000.0);
        assert_eq!(project.location.city, "Tacoma");
    }

    #[tokio::test]
    async fn test_create_project_rejects_bad_value() {
        let (app, store) = app();
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/projects",
            Some(json!({"name": "X", "client": "Y", "estimatedValue": "abc"})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["detail"].as_str().unwrap().contains("estimatedValue"));
        assert!(store.snapshot().unwrap().projects.is_empty());
    }

    #[tokio::test]
    async fn test_create_project_requires_name() {
        let (app, _) = app();
        let (status, body) =
            send(&app, Method::POST, "/api/projects", Some(json!({"client": "Y"}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["detail"].as_str().unwrap().contains("name"));
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        let (app, _) = app();
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/projects")
            .header("content-type", "application/json")
            .body(HttpBody::from("{ nope"))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_project_list_and_detail_include_metrics() {
        let (app, _) = app();
        let id = create_project(&app).await;
        let (status, _) = send(
            &app,
            Method::POST,
            &format!("/api/projects/{}/categories", id),
            Some(json!({"name": "Electrical", "totalItems": "20", "estimatedValue": 90000})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, list) = send(&app, Method::GET, "/api/projects", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(list[0]["id"], id);
        assert_eq!(list[0]["metrics"]["totalMaterials"], 20);
        assert_eq!(list[0]["metrics"]["completionPercentage"], 0);

        let (status, detail) = send(&app, Method::GET, &format!("/api/projects/{}", id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(detail["name"], "Harbor Point");
        assert_eq!(detail["categories"][0]["name"], "Electrical");
        assert_eq!(detail["categories"][0]["vendors"], json!([]));
        assert_eq!(detail["categoryIds"].as_array().unwrap().len(), 1);

        let (status, _) = send(&app, Method::GET, "/api/projects/999", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_update_and_delete_project() {
        let (app, _) = app();
        let id = create_project(&app).await;
        let uri = format!("/api/projects/{}", id);

        let (status, body) = send(
            &app,
            Method::PUT,
            &uri,
            Some(json!({"estimatedValue": "3100000", "city": "Olympia", "favoriteColor": "teal"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["project"]["estimatedValue"], 3_100_000.0);
        assert_eq!(body["project"]["location"]["city"], "Olympia");
        assert_eq!(body["project"]["location"]["state"], "WA");
        assert!(body["project"].get("favoriteColor").is_none());

        let (status, _) = send(&app, Method::PUT, &uri, Some(json!({"estimatedValue": "x"}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(&app, Method::PUT, "/api/projects/999", Some(json!({"city": "A"}))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = send(&app, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_add_category_to_missing_project() {
        let (app, _) = app();
        let (status, _) = send(
            &app,
            Method::POST,
            "/api/projects/12/categories",
            Some(json!({"name": "Roofing"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_vendor_endpoints() {
        let (app, _) = app();
        let (status, body) =
            send(&app, Method::POST, "/api/vendors", Some(vendor_body("Sparks"))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["vendor"]["id"], 101);

        let mut missing_specialty = vendor_body("Dull");
        missing_specialty["specialties"] = json!([]);
        let (status, _) = send(&app, Method::POST, "/api/vendors", Some(missing_specialty)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, list) = send(&app, Method::GET, "/api/vendors", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(list.as_array().unwrap().len(), 1);
        assert_eq!(list[0]["companyName"], "Sparks");
    }

    #[tokio::test]
    async fn test_category_views() {
        let (app, store) = app();
        let project_id = create_project(&app).await;
        let (_, body) = send(
            &app,
            Method::POST,
            &format!("/api/projects/{}/categories", project_id),
            Some(json!({"name": "Electrical", "totalItems": 10})),
        )
        .await;
        let category_id = body["category"]["id"].as_u64().unwrap();

        let vendors_uri = format!("/api/categories/{}/vendors", category_id);
        let (status, _) = send(&app, Method::GET, &vendors_uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        for name in ["A", "B", "C"] {
            send(&app, Method::POST, "/api/vendors", Some(vendor_body(name))).await;
        }
        let mut dataset: Dataset = store.snapshot().unwrap();
        let category = dataset
            .categories
            .iter_mut()
            .find(|c| c.id == category_id)
            .unwrap();
        category.vendor_participation = serde_json::from_value(json!([
            {"vendorId": 101, "bidAmount": 100, "bidStatus": "submitted", "bidDate": "2024-05-01"},
            {"vendorId": 102, "bidAmount": 200, "bidStatus": "submitted", "bidDate": "2024-05-02"},
            {"vendorId": 103, "bidAmount": 300, "bidStatus": "submitted", "bidDate": "2024-05-03"},
            {"vendorId": 404, "bidAmount": 1, "bidStatus": "invited", "bidDate": "2024-05-04"}
        ]))
        .unwrap();
        store.save(&dataset).unwrap();

        let (status, vendors) = send(&app, Method::GET, &vendors_uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(vendors.as_array().unwrap().len(), 3);
        assert_eq!(vendors[0]["address"], "3 Yard Ln, Kent, WA 98032");

        let (status, quotes) = send(
            &app,
            Method::GET,
            &format!("/api/categories/{}/quotes", category_id),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(quotes["analytics"]["bestQuote"], 100.0);
        assert_eq!(quotes["analytics"]["averageQuote"], 200.0);
        assert_eq!(quotes["analytics"]["competitionLevel"], "High");
        assert_eq!(quotes["category"]["id"], category_id);

        let (status, management) = send(
            &app,
            Method::GET,
            &format!("/api/categories/{}/vendor-management", category_id),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(management["statistics"]["quotesReceived"], 3);
        assert_eq!(management["statistics"]["totalVendors"], 3);

        let (status, _) = send(&app, Method::GET, "/api/categories/77/quotes", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_outreach_endpoints_acknowledge_only() {
        let (app, store) = app();
        let project_id = create_project(&app).await;
        let (_, body) = send(
            &app,
            Method::POST,
            &format!("/api/projects/{}/categories", project_id),
            Some(json!({"name": "Paint"})),
        )
        .await;
        let category_id = body["category"]["id"].as_u64().unwrap();
        send(&app, Method::POST, "/api/vendors", Some(vendor_body("Brush"))).await;
        let before = store.snapshot().unwrap();

        let (status, receipt) = send(
            &app,
            Method::POST,
            &format!("/api/categories/{}/invite", category_id),
            Some(json!({"vendorIds": [101]})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(receipt["persisted"], false);

        let (status, _) = send(
            &app,
            Method::POST,
            &format!("/api/categories/{}/vendors/101/contact", category_id),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, receipt) = send(
            &app,
            Method::POST,
            &format!("/api/categories/{}/select-quote", category_id),
            Some(json!({"vendorId": 101})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(receipt["action"], "select_quote");

        assert_eq!(store.snapshot().unwrap(), before);
    }

    #[tokio::test]
    async fn test_templates() {
        let (app, _) = app();
        let (status, catalog) = send(&app, Method::GET, "/api/project-templates", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(!catalog.as_array().unwrap().is_empty());

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/projects/from-template",
            Some(json!({
                "templateName": "retail_fitout",
                "projectData": {"name": "Store 12", "client": "Outfitters", "estimatedValue": "900000"},
                "includeCategories": true
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["project"]["estimatedValue"], 900_000.0);
        assert_eq!(body["project"]["status"], "early");
        assert_eq!(body["categories"].as_array().unwrap().len(), 3);

        let (status, _) = send(
            &app,
            Method::POST,
            "/api/projects/from-template",
            Some(json!({"templateName": "castle", "projectData": {"name": "A", "client": "B"}})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_groups() {
        let (app, _) = app_with(Dataset {
            groups: serde_json::from_value(json!([
                {"id": 1, "name": "Waterfront", "status": "active", "type": "district", "totalValue": 5.0}
            ]))
            .unwrap(),
            ..Dataset::default()
        });

        let id = create_project(&app).await;
        send(&app, Method::PUT, &format!("/api/projects/{}", id), Some(json!({"groupId": 1}))).await;

        let (status, groups) = send(&app, Method::GET, "/api/groups", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(groups[0]["actualProjectCount"], 1);
        assert_eq!(groups[0]["actualTotalValue"], 2_500_000.0);
        assert_eq!(groups[0]["activeProjects"], 1);
        assert_eq!(groups[0]["type"], "district");

        let (status, group) = send(&app, Method::GET, "/api/groups/1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(group["projects"][0]["id"], id);

        let (status, _) = send(&app, Method::GET, "/api/groups/2", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
