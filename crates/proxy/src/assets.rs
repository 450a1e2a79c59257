use axum::{
	extract::State,
	http::{StatusCode, Uri, header},
	response::{IntoResponse, Response},
};
use std::{
	io,
	path::{Component, Path, PathBuf},
	sync::Arc,
};
use tracing::warn;

/// Static files for the development server.
#[derive(Clone, Debug)]
pub struct Assets {
	root: Arc<Path>,
}

impl Assets {
	pub const INDEX: &'static str = "index.html";

	pub fn new(root: impl Into<PathBuf>) -> Self {
		Assets {
			root: Arc::from(root.into()),
		}
	}

	pub fn root(&self) -> &Path {
		&self.root
	}

	/// File a request path maps to. `None` for paths that would leave the
	/// root.
	pub fn resolve(&self, request_path: &str) -> Option<PathBuf> {
		let relative = request_path.trim_start_matches('/');
		let relative = if relative.is_empty() {
			Self::INDEX
		} else {
			relative
		};

		let mut path = self.root.to_path_buf();
		for component in Path::new(relative).components() {
			match component {
				Component::Normal(part) => path.push(part),
				Component::CurDir => {}
				Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
			}
		}

		Some(path)
	}

	pub async fn load(&self, request_path: &str) -> Response {
		let Some(path) = self.resolve(request_path) else {
			return not_found();
		};

		match tokio::fs::read(&path).await {
			Ok(content) => (
				StatusCode::OK,
				[(header::CONTENT_TYPE, content_type(&path))],
				content,
			)
				.into_response(),
			Err(err) if err.kind() == io::ErrorKind::NotFound => not_found(),
			Err(err) => {
				warn!(path = %path.display(), error = %err, "failed to read static file");
				(StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response()
			}
		}
	}
}

pub async fn handler(State(assets): State<Assets>, uri: Uri) -> Response {
	assets.load(uri.path()).await
}

fn not_found() -> Response {
	(StatusCode::NOT_FOUND, "File not found").into_response()
}

pub fn content_type(path: &Path) -> &'static str {
	match path.extension().and_then(|ext| ext.to_str()) {
		Some("html") => "text/html",
		Some("css") => "text/css",
		Some("js") => "text/javascript",
		Some("svg") => "image/svg+xml",
		_ => "application/octet-stream",
	}
}
