//! Placeholder substitution for the static templates

use super::store::Template;
use crate::error::{Result, ScaffoldError};

/// Substitute every `${key}` in `template` with its value
///
/// The template text is scanned once, left to right. Substituted values are
/// copied verbatim and never scanned again, so a value may itself contain
/// `${...}`. A marker in the template with no matching value is an error, so
/// a missing value never ends up in a written file.
pub fn render(template: &Template, values: &[(&str, &str)]) -> Result<String> {
    let mut out = String::with_capacity(template.text.len());
    let mut rest = template.text;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let marker = &rest[start + 2..];
        let end = marker.find('}').unwrap_or(marker.len());
        let key = &marker[..end];

        let value = values
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| *v)
            .filter(|_| end < marker.len())
            .ok_or_else(|| ScaffoldError::Render {
                template: template.name,
                placeholder: key.to_string(),
            })?;
        out.push_str(value);
        rest = &marker[end + 1..];
    }
    out.push_str(rest);

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::store;

    #[test]
    fn test_render_substitutes_all_occurrences() {
        let out = render(
            &store::SOLUTION_PROJECT_CONFIGURATION,
            &[("project_guid", "ABC")],
        )
        .unwrap();
        assert_eq!(
            out,
            "\t\t{ABC}.Debug|Any CPU.ActiveCfg = Debug|Any CPU\n\t\t{ABC}.Debug|Any CPU.Build.0 = Debug|Any CPU"
        );
    }

    #[test]
    fn test_render_rejects_missing_value() {
        let err = render(
            &store::TEST_MDK_INI,
            &[("ignores", "x"), ("output", "auto")],
        )
        .unwrap_err();
        match err {
            ScaffoldError::Render {
                template,
                placeholder,
            } => {
                assert_eq!(template, "test mdk.ini");
                assert_eq!(placeholder, "binary_path");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_values_are_inserted_verbatim() {
        let out = render(
            &store::SOLUTION_PROJECT,
            &[
                ("project_type", "T"),
                ("name", "${project_guid}"),
                ("relative_path", "Scripts/Cost${x}/Cost${x}.csproj"),
                ("project_guid", "ID"),
            ],
        )
        .unwrap();
        assert_eq!(
            out,
            "Project(\"{T}\") = \"${project_guid}\", \"Scripts/Cost${x}/Cost${x}.csproj\", \"{ID}\"\nEndProject"
        );
    }

    #[test]
    fn test_unterminated_marker_is_rejected() {
        let template = Template {
            name: "broken",
            text: "a ${open",
        };
        let err = render(&template, &[("open", "x")]).unwrap_err();
        assert_eq!(err.code(), "RENDER_ERROR");
    }

    #[test]
    fn test_render_keeps_msbuild_properties() {
        let out = render(&store::PROJITEMS, &[("shared_guid", store::SHARED_GROUP_ID)]).unwrap();
        assert!(out.contains("$(MSBuildThisFileDirectory)\\*.cs"));
        assert!(out.contains("<SharedGUID>8a3cdcc5-4b55-4d87-a415-698a0e1ff06f</SharedGUID>"));
    }

    #[test]
    fn test_script_config_has_packaging_directives_and_test_config_does_not() {
        let values = [("ignores", "i"), ("output", "auto"), ("binary_path", "auto")];
        let script = render(&store::SCRIPT_MDK_INI, &values).unwrap();
        let test = render(&store::TEST_MDK_INI, &values).unwrap();

        for key in ["type=", "trace=", "minify="] {
            assert!(script.contains(key));
            assert!(!test.contains(key));
        }
    }
}
