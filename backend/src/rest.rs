//! REST surface over the domain services.
//!
//! Every handler wraps its payload in the `ApiResponse` envelope; service
//! errors become a failed envelope plus a status code from `error_status`.
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use tracing::info;

use shared::{
    AddManualEntryRequest, ApiResponse, CheckInRequest, CheckInStateDto, CheckOutRequest,
    CurrentStatusResponse, DaySummaryDto, EmployeeDto, EmployeeRoleDto, EntryStatusDto,
    HistoryQuery, LocationDto, LocationSummaryDto, TimeEntryDto, TimeSummaryDto,
    TimeSummaryQueryParams, UpdateEntryRequest,
};

use crate::domain::commands::time_entry::{
    AddManualEntryCommand, CheckInCommand, CheckInState, CheckOutCommand, HistoryFilters,
    TimeSummaryQuery, UpdateEntryCommand,
};
use crate::domain::models::employee::{Employee, EmployeeRole};
use crate::domain::models::location::Location;
use crate::domain::models::time_entry::{EntryStatus, TimeEntry};
use crate::domain::reporting::TimeSummary;
use crate::errors::ServiceError;
use crate::Backend;

pub fn router(backend: Arc<Backend>) -> Router {
    let api = Router::new()
        .route("/employees", get(list_employees))
        .route("/employees/:id", get(get_employee))
        .route("/employees/:id/status", get(current_status))
        .route("/employees/:id/check-in", post(check_in))
        .route("/employees/:id/check-out", post(check_out))
        .route("/employees/:id/history", get(history))
        .route("/employees/:id/summary", get(time_summary))
        .route("/employees/:id/entries", post(add_manual_entry))
        .route("/entries/:id", get(get_entry).patch(update_entry))
        .route("/locations", get(list_locations))
        .route("/locations/:id", get(get_location));

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .with_state(backend)
}

async fn health() -> &'static str {
    "ok"
}

/// HTTP status for a failed envelope.
fn error_status(err: &ServiceError) -> StatusCode {
    match err {
        ServiceError::AlreadyCheckedIn | ServiceError::NoActiveCheckIn => StatusCode::CONFLICT,
        ServiceError::RecordNotFound
        | ServiceError::EmployeeNotFound
        | ServiceError::LocationNotFound => StatusCode::NOT_FOUND,
        ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
        ServiceError::Backend(_) => StatusCode::BAD_GATEWAY,
    }
}

fn fail<T>(err: ServiceError) -> (StatusCode, Json<ApiResponse<T>>) {
    (error_status(&err), Json(ApiResponse::fail(err.to_string())))
}

fn parse_timestamp(
    field: &str,
    raw: &str,
) -> Result<DateTime<Utc>, ServiceError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| ServiceError::Validation(format!("Invalid {field}: {raw:?}")))
}

fn parse_optional(
    field: &str,
    raw: Option<&str>,
) -> Result<Option<DateTime<Utc>>, ServiceError> {
    raw.map(|value| parse_timestamp(field, value)).transpose()
}

fn entry_to_dto(entry: TimeEntry) -> TimeEntryDto {
    TimeEntryDto {
        id: entry.id,
        employee_id: entry.employee_id,
        location_id: entry.location_id,
        check_in_time: entry.check_in_time.to_rfc3339(),
        check_out_time: entry.check_out_time.map(|t| t.to_rfc3339()),
        duration_minutes: entry.duration_minutes,
        notes: entry.notes,
        status: match entry.status {
            EntryStatus::Open => EntryStatusDto::Open,
            EntryStatus::Closed => EntryStatusDto::Closed,
        },
        created_at: entry.created_at.to_rfc3339(),
        modified_at: entry.modified_at.to_rfc3339(),
    }
}

fn employee_to_dto(employee: Employee) -> EmployeeDto {
    EmployeeDto {
        id: employee.id,
        name: employee.name,
        email: employee.email,
        department: employee.department,
        manager_id: employee.manager_id,
        role: match employee.role {
            EmployeeRole::Employee => EmployeeRoleDto::Employee,
            EmployeeRole::Manager => EmployeeRoleDto::Manager,
            EmployeeRole::Admin => EmployeeRoleDto::Admin,
        },
        is_active: employee.is_active,
    }
}

fn location_to_dto(location: Location) -> LocationDto {
    LocationDto {
        id: location.id,
        name: location.name,
        address: location.address,
        latitude: location.latitude,
        longitude: location.longitude,
        is_active: location.is_active,
    }
}

fn summary_to_dto(summary: TimeSummary) -> TimeSummaryDto {
    TimeSummaryDto {
        total_minutes: summary.total_minutes,
        total_hours: summary.total_hours,
        by_location: summary
            .by_location
            .into_iter()
            .map(|l| LocationSummaryDto {
                location_id: l.location_id,
                location_name: l.location_name,
                minutes: l.minutes,
            })
            .collect(),
        by_day: summary
            .by_day
            .into_iter()
            .map(|d| DaySummaryDto {
                date: d.date.to_string(),
                minutes: d.minutes,
            })
            .collect(),
    }
}

async fn list_employees(
    State(backend): State<Arc<Backend>>,
) -> (StatusCode, Json<ApiResponse<Vec<EmployeeDto>>>) {
    match backend.directory_service.employees().await {
        Ok(employees) => (
            StatusCode::OK,
            Json(ApiResponse::ok(
                employees.into_iter().map(employee_to_dto).collect(),
            )),
        ),
        Err(err) => fail(err),
    }
}

async fn get_employee(
    State(backend): State<Arc<Backend>>,
    Path(id): Path<String>,
) -> (StatusCode, Json<ApiResponse<EmployeeDto>>) {
    match backend.directory_service.employee(&id).await {
        Ok(employee) => (StatusCode::OK, Json(ApiResponse::ok(employee_to_dto(employee)))),
        Err(err) => fail(err),
    }
}

async fn list_locations(
    State(backend): State<Arc<Backend>>,
) -> (StatusCode, Json<ApiResponse<Vec<LocationDto>>>) {
    match backend.directory_service.locations().await {
        Ok(locations) => (
            StatusCode::OK,
            Json(ApiResponse::ok(
                locations.into_iter().map(location_to_dto).collect(),
            )),
        ),
        Err(err) => fail(err),
    }
}

async fn get_location(
    State(backend): State<Arc<Backend>>,
    Path(id): Path<String>,
) -> (StatusCode, Json<ApiResponse<LocationDto>>) {
    match backend.directory_service.location(&id).await {
        Ok(location) => (StatusCode::OK, Json(ApiResponse::ok(location_to_dto(location)))),
        Err(err) => fail(err),
    }
}

async fn current_status(
    State(backend): State<Arc<Backend>>,
    Path(id): Path<String>,
) -> (StatusCode, Json<ApiResponse<CurrentStatusResponse>>) {
    match backend.time_entry_service.current_status(&id).await {
        Ok(status) => {
            let response = CurrentStatusResponse {
                status: match status.state {
                    CheckInState::CheckedIn => CheckInStateDto::CheckedIn,
                    CheckInState::CheckedOut => CheckInStateDto::CheckedOut,
                },
                current_record: status.current_record.map(entry_to_dto),
                location: status.location.map(location_to_dto),
            };
            (StatusCode::OK, Json(ApiResponse::ok(response)))
        }
        Err(err) => fail(err),
    }
}

async fn check_in(
    State(backend): State<Arc<Backend>>,
    Path(id): Path<String>,
    Json(request): Json<CheckInRequest>,
) -> (StatusCode, Json<ApiResponse<TimeEntryDto>>) {
    info!(employee = %id, location = %request.location_id, "POST check-in");

    let command = CheckInCommand {
        employee_id: id,
        location_id: request.location_id,
        notes: request.notes,
    };
    match backend.time_entry_service.check_in(command).await {
        Ok(entry) => (StatusCode::CREATED, Json(ApiResponse::ok(entry_to_dto(entry)))),
        Err(err) => fail(err),
    }
}

async fn check_out(
    State(backend): State<Arc<Backend>>,
    Path(id): Path<String>,
    Json(request): Json<CheckOutRequest>,
) -> (StatusCode, Json<ApiResponse<TimeEntryDto>>) {
    info!(employee = %id, "POST check-out");

    let command = CheckOutCommand {
        employee_id: id,
        notes: request.notes,
    };
    match backend.time_entry_service.check_out(command).await {
        Ok(entry) => (StatusCode::OK, Json(ApiResponse::ok(entry_to_dto(entry)))),
        Err(err) => fail(err),
    }
}

async fn history(
    State(backend): State<Arc<Backend>>,
    Path(id): Path<String>,
    Query(query): Query<HistoryQuery>,
) -> (StatusCode, Json<ApiResponse<Vec<TimeEntryDto>>>) {
    let filters = match build_history_filters(&query) {
        Ok(filters) => filters,
        Err(err) => return fail(err),
    };
    match backend.time_entry_service.history(&id, filters).await {
        Ok(entries) => (
            StatusCode::OK,
            Json(ApiResponse::ok(entries.into_iter().map(entry_to_dto).collect())),
        ),
        Err(err) => fail(err),
    }
}

fn build_history_filters(query: &HistoryQuery) -> Result<HistoryFilters, ServiceError> {
    Ok(HistoryFilters {
        start_date: parse_optional("start_date", query.start_date.as_deref())?,
        end_date: parse_optional("end_date", query.end_date.as_deref())?,
        location_id: query.location_id.clone(),
    })
}

async fn time_summary(
    State(backend): State<Arc<Backend>>,
    Path(id): Path<String>,
    Query(params): Query<TimeSummaryQueryParams>,
) -> (StatusCode, Json<ApiResponse<TimeSummaryDto>>) {
    let query = TimeSummaryQuery {
        employee_id: id,
        start_date: match parse_timestamp("start_date", &params.start_date) {
            Ok(dt) => dt,
            Err(err) => return fail(err),
        },
        end_date: match parse_timestamp("end_date", &params.end_date) {
            Ok(dt) => dt,
            Err(err) => return fail(err),
        },
        location_id: params.location_id,
    };
    match backend.time_entry_service.time_summary(query).await {
        Ok(summary) => (StatusCode::OK, Json(ApiResponse::ok(summary_to_dto(summary)))),
        Err(err) => fail(err),
    }
}

async fn get_entry(
    State(backend): State<Arc<Backend>>,
    Path(id): Path<String>,
) -> (StatusCode, Json<ApiResponse<TimeEntryDto>>) {
    match backend.time_entry_service.get_entry(&id).await {
        Ok(entry) => (StatusCode::OK, Json(ApiResponse::ok(entry_to_dto(entry)))),
        Err(err) => fail(err),
    }
}

async fn update_entry(
    State(backend): State<Arc<Backend>>,
    Path(id): Path<String>,
    Json(request): Json<UpdateEntryRequest>,
) -> (StatusCode, Json<ApiResponse<TimeEntryDto>>) {
    info!(entry = %id, "PATCH entry");

    let command = match build_update_command(id, request) {
        Ok(command) => command,
        Err(err) => return fail(err),
    };
    match backend.time_entry_service.update_entry(command).await {
        Ok(entry) => (StatusCode::OK, Json(ApiResponse::ok(entry_to_dto(entry)))),
        Err(err) => fail(err),
    }
}

fn build_update_command(
    entry_id: String,
    request: UpdateEntryRequest,
) -> Result<UpdateEntryCommand, ServiceError> {
    let check_out_time = match request.check_out_time {
        None => None,
        Some(None) => Some(None),
        Some(Some(raw)) => Some(Some(parse_timestamp("check_out_time", &raw)?)),
    };
    Ok(UpdateEntryCommand {
        entry_id,
        location_id: request.location_id,
        check_in_time: parse_optional("check_in_time", request.check_in_time.as_deref())?,
        check_out_time,
        notes: request.notes,
        reason: request.reason,
    })
}

async fn add_manual_entry(
    State(backend): State<Arc<Backend>>,
    Path(id): Path<String>,
    Json(request): Json<AddManualEntryRequest>,
) -> (StatusCode, Json<ApiResponse<TimeEntryDto>>) {
    info!(employee = %id, "POST manual entry");

    let command = AddManualEntryCommand {
        employee_id: id,
        location_id: request.location_id,
        check_in_time: match parse_timestamp("check_in_time", &request.check_in_time) {
            Ok(dt) => dt,
            Err(err) => return fail(err),
        },
        check_out_time: match parse_optional("check_out_time", request.check_out_time.as_deref()) {
            Ok(out) => out,
            Err(err) => return fail(err),
        },
        notes: request.notes,
        reason: request.reason,
    };
    match backend.time_entry_service.add_manual_entry(command).await {
        Ok(entry) => (StatusCode::CREATED, Json(ApiResponse::ok(entry_to_dto(entry)))),
        Err(err) => fail(err),
    }
}
