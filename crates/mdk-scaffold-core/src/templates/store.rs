//! Static templates for every generated artifact
//!
//! Placeholders are written `${name}` and have no defaults; callers fill them
//! through [`super::render`]. `${` never occurs in the literal text of these
//! formats (MSBuild properties use `$(`), so the markers are unambiguous.

/// Shared-group identifier declared by every mixin's shared-items manifest
pub const SHARED_GROUP_ID: &str = "8a3cdcc5-4b55-4d87-a415-698a0e1ff06f";

/// Project type GUID for C# projects in a solution file
pub const CSHARP_PROJECT_TYPE: &str = "FAE04EC0-301F-11D3-BF4B-00C04F79EFBC";

/// Constant solution GUID written into the `ExtensibilityGlobals` section
pub const SOLUTION_GUID: &str = "BE490A9C-7324-4360-B400-8E064DC34F5F";

/// A named template and its text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    pub name: &'static str,
    pub text: &'static str,
}

/// Shared-items manifest (`<mixin>.projitems`)
///
/// Placeholders: `shared_guid`
pub const PROJITEMS: Template = Template {
    name: "projitems",
    text: r#"<?xml version="1.0" encoding="utf-8"?>
<Project xmlns="http://schemas.microsoft.com/developer/msbuild/2003">
  <PropertyGroup>
    <MSBuildAllProjects Condition="'$(MSBuildVersion)' == '' Or '$(MSBuildVersion)' &lt; '16.0'">$(MSBuildAllProjects);$(MSBuildThisFileFullPath)</MSBuildAllProjects>
    <HasSharedItems>true</HasSharedItems>
    <SharedGUID>${shared_guid}</SharedGUID>
  </PropertyGroup>
  <ItemGroup>
    <Compile Include="$(MSBuildThisFileDirectory)\*.cs" />
  </ItemGroup>
</Project>
"#,
};

/// Tool-config for a script (`<script>.mdk.ini`)
///
/// Placeholders: `ignores`, `output`, `binary_path`
pub const SCRIPT_MDK_INI: Template = Template {
    name: "script mdk.ini",
    text: "[mdk]
type=programmableblock
trace=off
minify=lite
ignores=${ignores}
output=${output}
binarypath=${binary_path}
",
};

/// Tool-config for a test project (`<test>.mdk.ini`)
///
/// Same keys as [`SCRIPT_MDK_INI`] minus the packaging directives.
pub const TEST_MDK_INI: Template = Template {
    name: "test mdk.ini",
    text: "[mdk]
ignores=${ignores}
output=${output}
binarypath=${binary_path}
",
};

/// Aggregate solution document
///
/// Placeholders: `projects`, `project_configurations`, `solution_guid`
pub const SOLUTION: Template = Template {
    name: "solution",
    text: "
Microsoft Visual Studio Solution File, Format Version 12.00
# Visual Studio Version 17
VisualStudioVersion = 17.5.2.0
MinimumVisualStudioVersion = 10.0.40219.1
${projects}
Global
\tGlobalSection(SolutionConfigurationPlatforms) = preSolution
\t\tDebug|Any CPU = Debug|Any CPU
\tEndGlobalSection
\tGlobalSection(ProjectConfigurationPlatforms) = postSolution
${project_configurations}
\tEndGlobalSection
\tGlobalSection(SolutionProperties) = preSolution
\t\tHideSolutionNode = FALSE
\tEndGlobalSection
\tGlobalSection(ExtensibilityGlobals) = postSolution
\t\tSolutionGuid = {${solution_guid}}
\tEndGlobalSection
EndGlobal
",
};

/// One project entry of the solution document
///
/// Placeholders: `project_type`, `name`, `relative_path`, `project_guid`
pub const SOLUTION_PROJECT: Template = Template {
    name: "solution project",
    text: "Project(\"{${project_type}}\") = \"${name}\", \"${relative_path}\", \"{${project_guid}}\"\nEndProject",
};

/// Configuration lines for one solution project
///
/// Placeholders: `project_guid`
pub const SOLUTION_PROJECT_CONFIGURATION: Template = Template {
    name: "solution project configuration",
    text: "\t\t{${project_guid}}.Debug|Any CPU.ActiveCfg = Debug|Any CPU\n\t\t{${project_guid}}.Debug|Any CPU.Build.0 = Debug|Any CPU",
};

/// Ignore patterns handed to MDK for every script and test
pub const MDK_IGNORES: &str = "obj/**/*,MDK/**/*,**/*.debug.cs";
