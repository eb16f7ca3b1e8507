use std::path::Path;

use axum::Router;
use tower_http::services::{ServeDir, ServeFile};

use crate::state::AppState;

/// Route → HTML file under the pages directory.
pub const PAGES: [(&str, &str); 10] = [
    ("/", "login.html"),
    ("/home", "home.html"),
    ("/about", "aboutus.html"),
    ("/signup", "signup.html"),
    ("/login", "login.html"),
    ("/logout", "login.html"),
    ("/bmi", "bmi.html"),
    ("/calorie", "calorie.html"),
    ("/dietplan", "dietplan.html"),
    ("/exerciseplan", "exerciseplan.html"),
];

pub fn router(pages_dir: &str, static_dir: &str) -> Router<AppState> {
    let pages_dir = Path::new(pages_dir);
    PAGES
        .iter()
        .fold(Router::new(), |router, (route, file)| {
            router.route_service(route, ServeFile::new(pages_dir.join(file)))
        })
        .nest_service("/static", ServeDir::new(static_dir))
}
