//! Conversion bundles attached to boxes.
//!
//! Every box carries four optional converters. Formatting converters
//! receive the box itself and the value to render, so they can read the
//! box's settings (`has_time`, `fraction_digits`, `text`, ...). The parser
//! receives the box and the text to interpret.

use std::fmt;
use std::sync::Arc;

/// Converter rendering a value as text.
pub type Format<B, T> = Arc<dyn Fn(&B, &T) -> String + Send + Sync>;

/// Converter interpreting text as a value.
pub type Parse<B, T> = Arc<dyn Fn(&B, &str) -> T + Send + Sync>;

/// An option slot that distinguishes "not supplied" from "explicitly cleared".
///
/// When a box is built, `Inherit` keeps whatever the base provides (the
/// subtype default, or the source box when cloning), `Set` replaces it and
/// `Clear` removes it.
#[derive(Clone, Default, PartialEq, Eq)]
pub enum Override<T> {
    /// Keep the inherited setting.
    #[default]
    Inherit,
    /// Replace the inherited setting.
    Set(T),
    /// Remove the inherited setting.
    Clear,
}

impl<T> Override<T> {
    /// Resolve this slot against the inherited setting.
    pub fn resolve(self, inherited: Option<T>) -> Option<T> {
        match self {
            Self::Inherit => inherited,
            Self::Set(value) => Some(value),
            Self::Clear => None,
        }
    }
}

impl<T> From<Option<T>> for Override<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Self::Set(value),
            None => Self::Clear,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Override<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inherit => f.write_str("Inherit"),
            Self::Set(value) => f.debug_tuple("Set").field(value).finish(),
            Self::Clear => f.write_str("Clear"),
        }
    }
}

/// The converters attached to a box.
pub struct Converters<B, T> {
    /// Plain text rendering.
    pub stringify: Option<Format<B, T>>,
    /// Text interpretation.
    pub parse: Option<Parse<B, T>>,
    /// Formatted text rendering; preferred over `stringify` for display.
    pub formatify: Option<Format<B, T>>,
    /// HTML rendering.
    pub htmlify: Option<Format<B, T>>,
}

impl<B, T> Converters<B, T> {
    /// A bundle with no converters.
    pub fn none() -> Self {
        Self {
            stringify: None,
            parse: None,
            formatify: None,
            htmlify: None,
        }
    }

    /// Render through `formatify`, falling back to `stringify`.
    pub fn display(&self, owner: &B, value: &T) -> Option<String> {
        self.formatify
            .as_ref()
            .or(self.stringify.as_ref())
            .map(|f| f(owner, value))
    }

    /// Render through `htmlify`.
    pub fn html(&self, owner: &B, value: &T) -> Option<String> {
        self.htmlify.as_ref().map(|f| f(owner, value))
    }
}

impl<B, T> Default for Converters<B, T> {
    fn default() -> Self {
        Self::none()
    }
}

impl<B, T> Clone for Converters<B, T> {
    fn clone(&self) -> Self {
        Self {
            stringify: self.stringify.clone(),
            parse: self.parse.clone(),
            formatify: self.formatify.clone(),
            htmlify: self.htmlify.clone(),
        }
    }
}

impl<B, T> fmt::Debug for Converters<B, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Converters")
            .field("stringify", &self.stringify.is_some())
            .field("parse", &self.parse.is_some())
            .field("formatify", &self.formatify.is_some())
            .field("htmlify", &self.htmlify.is_some())
            .finish()
    }
}

/// Per-converter overrides supplied when building a box.
pub struct ConverterOverrides<B, T> {
    /// Override for `stringify`.
    pub stringify: Override<Format<B, T>>,
    /// Override for `parse`.
    pub parse: Override<Parse<B, T>>,
    /// Override for `formatify`.
    pub formatify: Override<Format<B, T>>,
    /// Override for `htmlify`.
    pub htmlify: Override<Format<B, T>>,
}

impl<B, T> ConverterOverrides<B, T> {
    /// Apply the overrides on top of a base bundle.
    pub fn apply(self, base: Converters<B, T>) -> Converters<B, T> {
        Converters {
            stringify: self.stringify.resolve(base.stringify),
            parse: self.parse.resolve(base.parse),
            formatify: self.formatify.resolve(base.formatify),
            htmlify: self.htmlify.resolve(base.htmlify),
        }
    }
}

impl<B, T> Default for ConverterOverrides<B, T> {
    fn default() -> Self {
        Self {
            stringify: Override::Inherit,
            parse: Override::Inherit,
            formatify: Override::Inherit,
            htmlify: Override::Inherit,
        }
    }
}

impl<B, T> Clone for ConverterOverrides<B, T> {
    fn clone(&self) -> Self {
        Self {
            stringify: self.stringify.clone(),
            parse: self.parse.clone(),
            formatify: self.formatify.clone(),
            htmlify: self.htmlify.clone(),
        }
    }
}

impl<B, T> fmt::Debug for ConverterOverrides<B, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn slot<X>(o: &Override<X>) -> &'static str {
            match o {
                Override::Inherit => "inherit",
                Override::Set(_) => "set",
                Override::Clear => "clear",
            }
        }
        f.debug_struct("ConverterOverrides")
            .field("stringify", &slot(&self.stringify))
            .field("parse", &slot(&self.parse))
            .field("formatify", &slot(&self.formatify))
            .field("htmlify", &slot(&self.htmlify))
            .finish()
    }
}

/// Builder methods shared by every box options type.
pub trait BoxOptions: Sized {
    /// The box these options build.
    type Target;
    /// The raw value type converters operate on.
    type Raw;

    /// Mutable access to the type tag slot.
    fn kind_slot(&mut self) -> &mut Override<String>;

    /// Mutable access to the converter overrides.
    fn converters_mut(&mut self) -> &mut ConverterOverrides<Self::Target, Self::Raw>;

    /// Set the opaque type tag.
    fn kind(mut self, kind: impl Into<String>) -> Self {
        *self.kind_slot() = Override::Set(kind.into());
        self
    }

    /// Set the `stringify` converter.
    fn stringify<F>(mut self, f: F) -> Self
    where
        F: Fn(&Self::Target, &Self::Raw) -> String + Send + Sync + 'static,
    {
        self.converters_mut().stringify = Override::Set(Arc::new(f));
        self
    }

    /// Set the `parse` converter.
    fn parse<F>(mut self, f: F) -> Self
    where
        F: Fn(&Self::Target, &str) -> Self::Raw + Send + Sync + 'static,
    {
        self.converters_mut().parse = Override::Set(Arc::new(f));
        self
    }

    /// Set the `formatify` converter.
    fn formatify<F>(mut self, f: F) -> Self
    where
        F: Fn(&Self::Target, &Self::Raw) -> String + Send + Sync + 'static,
    {
        self.converters_mut().formatify = Override::Set(Arc::new(f));
        self
    }

    /// Set the `htmlify` converter.
    fn htmlify<F>(mut self, f: F) -> Self
    where
        F: Fn(&Self::Target, &Self::Raw) -> String + Send + Sync + 'static,
    {
        self.converters_mut().htmlify = Override::Set(Arc::new(f));
        self
    }

    /// Remove the `stringify` converter, even if one would be inherited.
    fn clear_stringify(mut self) -> Self {
        self.converters_mut().stringify = Override::Clear;
        self
    }

    /// Remove the `parse` converter, even if one would be inherited.
    fn clear_parse(mut self) -> Self {
        self.converters_mut().parse = Override::Clear;
        self
    }

    /// Remove the `formatify` converter, even if one would be inherited.
    fn clear_formatify(mut self) -> Self {
        self.converters_mut().formatify = Override::Clear;
        self
    }

    /// Remove the `htmlify` converter, even if one would be inherited.
    fn clear_htmlify(mut self) -> Self {
        self.converters_mut().htmlify = Override::Clear;
        self
    }
}

/// Implements [`BoxOptions`] for an options struct with `kind` and
/// `converters` fields.
macro_rules! impl_box_options {
    ($options:ty => $target:ty, $raw:ty) => {
        impl $crate::convert::BoxOptions for $options {
            type Target = $target;
            type Raw = $raw;

            fn kind_slot(&mut self) -> &mut $crate::convert::Override<String> {
                &mut self.kind
            }

            fn converters_mut(
                &mut self,
            ) -> &mut $crate::convert::ConverterOverrides<$target, $raw> {
                &mut self.converters
            }
        }
    };
}

pub(crate) use impl_box_options;
