use crate::provider::FontModelProvider;

/// Macro to declare filters with less boilerplate
///
/// Usage: `declare_filters! { TypeName(module_name) => "cli_name", ... }`
macro_rules! declare_filters {
    ($($(#[$meta:meta])* $type:ident($module:ident) => $name:literal),* $(,)?) => {
        $(
            $(#[$meta])*
            mod $module;
        )*

        $(
            $(#[$meta])*
            pub use $module::$type;
        )*

        #[cfg(feature = "cli")]
        #[doc="Add filter arguments to a clap Command"]
        pub fn filter_group(mut command: clap::Command) -> clap::Command {
            command = command.next_help_heading("Font filters");
            let mut ids = Vec::new();
            $(
                $(#[$meta])*
                {
                    let arg = $type::arg();
                    ids.push(arg.get_id().clone());
                    command = command.arg(arg);
                }
            )*
            command.group(clap::ArgGroup::new("filters").args(ids).multiple(true))
        }

        #[doc="Convert a filter name and argument to a FontFilter instance"]
        pub fn cli_to_filter(name: &str, arg: &str) -> Result<Box<dyn FontFilter>, crate::KernToolsError> {
            Ok(match name {
                $(
                    $(#[$meta])*
                    $name => Box::new($type::from_str(arg)?),
                )*
                _ => {
                    return Err(crate::KernToolsError::FilterError(format!(
                        "Unknown filter: {}",
                        name
                    )))
                }
            })
        }
    };
}

declare_filters! {
    SanitizeKerning(sanitize) => "sanitize",
    SmallCapsKerning(smallcaps) => "smallcaps",
    ScaleKerning(scalekerning) => "scalekerning",
    DropSmallKerning(dropsmallkerning) => "dropsmallkerning",
    DropKerning(dropkerning) => "dropkerning",
    RelinkSmallCaps(relinksmallcaps) => "relinksmallcaps",
    AutoGroups(autogroups) => "autogroups",
    ExportKerning(exportkerning) => "exportkerning",
    ImportKerning(importkerning) => "importkerning",
    Roughen(roughen) => "roughen",
}

/// A trait for font filters that can be applied to a font
pub trait FontFilter {
    /// Apply the filter to the given font
    fn apply(&self, font: &mut crate::Font) -> Result<(), crate::KernToolsError>;

    /// Parse a FontFilter from a string argument
    fn from_str(s: &str) -> Result<Self, crate::KernToolsError>
    where
        Self: Sized;

    #[cfg(feature = "cli")]
    /// Get the clap argument for this filter
    fn arg() -> clap::Arg
    where
        Self: Sized;
}

/// The masters a filter should visit: the named one (which must exist), or all
fn target_masters(
    font: &crate::Font,
    master: Option<&str>,
) -> Result<Vec<String>, crate::KernToolsError> {
    let ids = font.master_ids();
    match master {
        Some(id) if ids.iter().any(|m| m == id) => Ok(vec![id.to_string()]),
        Some(id) => Err(crate::KernToolsError::MasterNotFound(id.to_string())),
        None => Ok(ids),
    }
}

/// The master named in the argument, or the font's only master
fn chosen_master(
    font: &crate::Font,
    master: Option<&str>,
) -> Result<String, crate::KernToolsError> {
    if let Some(id) = master {
        return Ok(id.to_string());
    }
    match font.master_ids().as_slice() {
        [only] => Ok(only.clone()),
        ids => Err(crate::KernToolsError::FilterError(format!(
            "font has {} masters; say which one with MASTER=PATH",
            ids.len()
        ))),
    }
}

/// Split a `MASTER=ARG` filter argument
fn split_master_arg(s: &str) -> (Option<String>, String) {
    match s.split_once('=') {
        Some((master, rest)) if !master.trim().is_empty() => {
            (Some(master.trim().to_string()), rest.trim().to_string())
        }
        _ => (None, s.trim().to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Font;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_split_master_arg() {
        assert_eq!(
            split_master_arg("m01=kern.json"),
            (Some("m01".to_string()), "kern.json".to_string())
        );
        assert_eq!(split_master_arg("kern.json"), (None, "kern.json".to_string()));
    }

    #[test]
    fn test_unknown_filter() {
        assert!(matches!(
            cli_to_filter("frobnicate", ""),
            Err(crate::KernToolsError::FilterError(_))
        ));
    }

    #[test]
    fn test_filters_in_order() {
        let mut font = Font::with_glyphs(["A", "V", "A.sc", "V.sc"]);
        font.masters[0].insert_kerning("A", "V", -100);
        for (name, arg) in [("smallcaps", "80"), ("scalekerning", "50")] {
            cli_to_filter(name, arg).unwrap().apply(&mut font).unwrap();
        }
        assert_eq!(font.masters[0].kerning_value("A", "V"), Some(-50));
        assert_eq!(font.masters[0].kerning_value("A.sc", "V.sc"), Some(-40));
    }

    #[test]
    fn test_missing_master() {
        let font = Font::with_glyphs(["A"]);
        assert!(matches!(
            target_masters(&font, Some("m09")),
            Err(crate::KernToolsError::MasterNotFound(_))
        ));
        assert_eq!(target_masters(&font, None).unwrap(), vec!["m01".to_string()]);
    }
}
