//! Build-scripts served to the document builder service.
//!
//! A script opens the template by URL, declares the values it needs, runs one of the bundled
//! fragments and saves the result.

use crate::server::model::value_tree::ValueTree;

const GET_KEYS_FRAGMENT: &str = include_str!("../../../../assets/get_keys.docbuilder");
const FILL_TEMPLATE_FRAGMENT: &str = include_str!("../../../../assets/fill_template.docbuilder");

/// File the key extraction job saves its keys to
pub const KEYS_OUTPUT_FILE: &str = "keys.txt";

/// Script writing the form keys of the template as a JSON array
pub fn keys_script(template_url: &str) -> Result<String, serde_json::Error> {
    Ok(format!(
        "builder.OpenFile({url});\n{fragment}\nbuilder.SaveFile(\"txt\", {output});\nbuilder.CloseFile();\n",
        url = serde_json::to_string(template_url)?,
        fragment = GET_KEYS_FRAGMENT,
        output = serde_json::to_string(KEYS_OUTPUT_FILE)?,
    ))
}

/// Script filling the forms of the template with `fields` and saving it as `<filename>.docx`
pub fn fill_script(
    template_url: &str,
    fields: &ValueTree,
    filename: &str,
) -> Result<String, serde_json::Error> {
    Ok(format!(
        "builder.OpenFile({url});\nvar fields = {fields};\n{fragment}\nbuilder.SaveFile(\"docxf\", {output});\nbuilder.CloseFile();\n",
        url = serde_json::to_string(template_url)?,
        fields = serde_json::to_string(fields)?,
        fragment = FILL_TEMPLATE_FRAGMENT,
        output = serde_json::to_string(&format!("{}.docx", filename))?,
    ))
}

/// Name of the filled document, `"<model description> - <record name>"`
pub fn fill_filename(description: &str, display_name: Option<&str>, record_id: i32) -> String {
    match display_name.filter(|name| !name.is_empty()) {
        Some(name) if description.is_empty() => name.to_string(),
        Some(name) => format!("{} - {}", description, name),
        None => format!("Filled Template - {}", record_id),
    }
}
