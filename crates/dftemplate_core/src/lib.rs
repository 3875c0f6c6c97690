//! Build, compress, and deliver DiamondFire code templates.

/// Template model, encoder, authoring documents, and CodeClient transport.
pub mod df;
