use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct TeacherDoc {
    pub id: i64,
    pub full_name: String,
    pub age: i64,
    pub dob: String,
    pub num_classes: i64,
}

/// All four fields are required; an `id` key is ignored.
#[derive(ToSchema)]
pub struct TeacherInputDoc {
    pub full_name: String,
    pub age: i64,
    pub dob: String,
    pub num_classes: i64,
}

#[derive(ToSchema)]
pub struct SuccessDoc { pub success: String }

#[derive(ToSchema)]
pub struct MessageDoc { pub message: String }

#[derive(ToSchema)]
pub struct ErrorDoc { pub error: String }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::teachers::show_teachers,
        crate::routes::teachers::add_teacher,
        crate::routes::teachers::delete_teacher,
        crate::routes::teachers::update_teacher,
        crate::routes::teachers::search_teachers,
        crate::routes::teachers::filtered_criteria,
    ),
    components(schemas(HealthResponse, TeacherDoc, TeacherInputDoc, SuccessDoc, MessageDoc, ErrorDoc)),
    tags(
        (name = "teachers", description = "Teacher records"),
        (name = "ops", description = "Operational endpoints")
    )
)]
pub struct ApiDoc;
