use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use common::types::{MessageBody, NoDataFound, SuccessBody};
use service::{Teacher, TeacherFilter, TeacherInput};

use crate::errors::{JsonApiError, Operation};
use crate::state::AppState;

/// Query string of `/filtered_criteria`. Values are kept as text so that a
/// non-integer value counts as "not supplied" instead of failing the request.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FilterQuery {
    /// Exact age to match
    #[param(value_type = Option<i64>)]
    pub age: Option<String>,
    /// Exact number of classes to match
    #[param(value_type = Option<i64>)]
    pub num_classes: Option<String>,
}

impl FilterQuery {
    pub fn to_filter(&self) -> TeacherFilter {
        TeacherFilter {
            age: parse_int(self.age.as_deref()),
            num_classes: parse_int(self.num_classes.as_deref()),
        }
    }
}

fn parse_int(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
}

/// A non-integer id matches no teacher route, so it answers 404 with the
/// usual JSON error body.
fn teacher_id(path: Result<Path<i64>, PathRejection>) -> Result<i64, JsonApiError> {
    path.map(|Path(id)| id)
        .map_err(|rejection| JsonApiError::new(StatusCode::NOT_FOUND, rejection.body_text()))
}

fn payload(body: Result<Json<TeacherInput>, JsonRejection>) -> Result<TeacherInput, JsonApiError> {
    body.map(|Json(input)| input)
        .map_err(|rejection| JsonApiError::bad_request(rejection.body_text()))
}

/// List every teacher
#[utoipa::path(get, path = "/show_teachers", tag = "teachers",
    responses((status = 200, description = "All teachers", body = [crate::openapi::TeacherDoc])))]
pub async fn show_teachers(State(state): State<AppState>) -> Result<Json<Vec<Teacher>>, JsonApiError> {
    state
        .store
        .list()
        .await
        .map(Json)
        .map_err(|e| JsonApiError::from_service(e, state.status_policy, Operation::Read))
}

/// Create a teacher; the id is assigned by the server
#[utoipa::path(post, path = "/add_teacher", tag = "teachers",
    request_body = crate::openapi::TeacherInputDoc,
    responses(
        (status = 200, description = "Inserted", body = crate::openapi::SuccessDoc),
        (status = 400, description = "Missing field or malformed JSON", body = crate::openapi::ErrorDoc)
    ))]
pub async fn add_teacher(
    State(state): State<AppState>,
    body: Result<Json<TeacherInput>, JsonRejection>,
) -> Result<Json<SuccessBody>, JsonApiError> {
    let input = payload(body)?;
    state
        .store
        .add(input)
        .await
        .map_err(|e| JsonApiError::from_service(e, state.status_policy, Operation::Add))?;
    Ok(Json(SuccessBody::new("Data inserted successfully")))
}

/// Delete a teacher by id
#[utoipa::path(delete, path = "/delete_teacher/{id}", tag = "teachers",
    params(("id" = i64, Path, description = "Teacher id")),
    responses(
        (status = 200, description = "Deleted", body = crate::openapi::MessageDoc),
        (status = 404, description = "No teacher with this id", body = crate::openapi::ErrorDoc)
    ))]
pub async fn delete_teacher(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<MessageBody>, JsonApiError> {
    let id = teacher_id(id)?;
    state
        .store
        .delete(id)
        .await
        .map_err(|e| JsonApiError::from_service(e, state.status_policy, Operation::Delete))?;
    Ok(Json(MessageBody::new("Teacher deleted successfully")))
}

/// Replace all fields of a teacher; the path id wins over any id in the body
#[utoipa::path(put, path = "/update_teacher/{id}", tag = "teachers",
    params(("id" = i64, Path, description = "Teacher id")),
    request_body = crate::openapi::TeacherInputDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::SuccessDoc),
        (status = 400, description = "Missing field or malformed JSON", body = crate::openapi::ErrorDoc),
        (status = 404, description = "No teacher with this id", body = crate::openapi::ErrorDoc)
    ))]
pub async fn update_teacher(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<TeacherInput>, JsonRejection>,
) -> Result<Json<SuccessBody>, JsonApiError> {
    let id = teacher_id(id)?;
    let input = payload(body)?;
    state
        .store
        .update(id, input)
        .await
        .map_err(|e| JsonApiError::from_service(e, state.status_policy, Operation::Update))?;
    Ok(Json(SuccessBody::new("Teacher updated successfully")))
}

/// First teacher whose full name matches exactly
#[utoipa::path(get, path = "/search_teachers/{name}", tag = "teachers",
    params(("name" = String, Path, description = "Exact full name")),
    responses((status = 200, description = "Teacher, or the no-data marker", body = crate::openapi::TeacherDoc)))]
pub async fn search_teachers(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Response, JsonApiError> {
    let found = state
        .store
        .find_by_name(&name)
        .await
        .map_err(|e| JsonApiError::from_service(e, state.status_policy, Operation::Read))?;
    Ok(match found {
        Some(teacher) => Json(teacher).into_response(),
        None => Json(NoDataFound::default()).into_response(),
    })
}

/// Teachers matching every supplied criterion
#[utoipa::path(get, path = "/filtered_criteria", tag = "teachers",
    params(FilterQuery),
    responses(
        (status = 200, description = "Matching teachers, or the no-data marker", body = [crate::openapi::TeacherDoc]),
        (status = 400, description = "Neither age nor num_classes given", body = crate::openapi::ErrorDoc)
    ))]
pub async fn filtered_criteria(
    State(state): State<AppState>,
    Query(query): Query<FilterQuery>,
) -> Result<Response, JsonApiError> {
    let matched = state
        .store
        .filter_by(query.to_filter())
        .await
        .map_err(|e| JsonApiError::from_service(e, state.status_policy, Operation::Read))?;
    if matched.is_empty() {
        return Ok(Json(NoDataFound::default()).into_response());
    }
    Ok(Json(matched).into_response())
}
