pub mod achievements;
pub mod admin;
pub mod attendance;
pub mod auth;
pub mod dashboard;
pub mod grades;
pub mod health;
pub mod navigation;
pub mod notifications;
pub mod reports;
pub mod routines;
pub mod schedules;
pub mod settings;
pub mod students;
pub mod tasks;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                          login (public)
/// /auth/refresh                        refresh (public)
/// /auth/logout                         logout
/// /auth/me                             current profile
///
/// /navigation/resolve                  client route decision (public)
///
/// /students                            roster (staff)
/// /admin/users                         list, create (admin)
/// /admin/users/{id}                    get, update (admin)
/// /admin/users/{id}/deactivate         deactivate (admin)
///
/// /attendance/check-in                 self check-in
/// /attendance/mark, /bulk              staff marking
/// /attendance/history, /today, /stats  per-user views
/// /attendance/class-summary            day summary (staff)
/// /attendance/{id}                     edit, delete (staff)
///
/// /grades                              list, create (staff)
/// /grades/stats                        per-student summary
/// /grades/subject/{subject}            one subject
/// /grades/class                        subject roster (staff)
/// /grades/{id}                         edit, delete (staff)
///
/// /schedules                           list, create (admin)
/// /schedules/bulk                      bulk create (admin)
/// /schedules/day/{day}, /today, /class views
/// /schedules/free-slots/{day}          gaps in the working day
/// /schedules/conflicts                 overlap check
/// /schedules/{id}                      edit, delete (admin)
/// /schedules/{id}/deactivate           soft delete (admin)
///
/// /tasks                               list, create (staff)
/// /tasks/assigned, /stats              views
/// /tasks/{id}                          edit, delete (staff)
/// /tasks/{id}/complete                 complete
///
/// /achievements                        list
/// /achievements/points                 points total
/// /achievements/check/{kind}           award attendance/academic badges
///
/// /notifications                       list, send (staff)
/// /notifications/bulk                  send to many (staff)
/// /notifications/unread-count          badge counter
/// /notifications/read-all              mark all read
/// /notifications/{id}/read             mark one read
///
/// /reports                             list
/// /reports/{attendance,grades,tasks}   generate (admin)
/// /reports/{id}                        get, delete (admin)
/// /reports/{id}/csv                    CSV download
///
/// /settings                            get, replace, patch
/// /routines                            list, create
/// /routines/today                      today's routine
/// /routines/{id}                       edit, delete
/// /dashboard                           role-specific summary
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        // Public; shapes client navigation only.
        .nest("/navigation", navigation::router())
        .nest("/students", students::router())
        .nest("/admin", admin::router())
        .nest("/attendance", attendance::router())
        .nest("/grades", grades::router())
        .nest("/schedules", schedules::router())
        .nest("/tasks", tasks::router())
        .nest("/achievements", achievements::router())
        .nest("/notifications", notifications::router())
        .nest("/reports", reports::router())
        .nest("/settings", settings::router())
        .nest("/routines", routines::router())
        .nest("/dashboard", dashboard::router())
}
