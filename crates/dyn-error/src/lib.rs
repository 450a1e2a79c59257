use std::{error::Error, fmt};

/// A type-erased error used as the `source` of the error enums across the
/// workspace.
pub struct DynError(Box<dyn Error + Send + Sync + 'static>);

impl DynError {
	pub fn new<E: Error + Send + Sync + 'static>(error: E) -> Self {
		Self(Box::new(error))
	}
}

impl fmt::Debug for DynError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Debug::fmt(&*self.0, f)
	}
}

impl fmt::Display for DynError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Display::fmt(&*self.0, f)
	}
}

impl Error for DynError {
	fn source(&self) -> Option<&(dyn Error + 'static)> {
		self.0.source()
	}
}
