//! The fixed results-ready notification template.

/// Subject line for the results-ready notification.
pub const RESULTS_READY_SUBJECT: &str = "Athena query results are ready";

/// Render the results-ready HTML body.
///
/// A minted link may be absent when presigning failed; the notification is
/// still sent so the requester learns the query finished.
pub fn results_ready_html(execution_id: &str, link: Option<&str>) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<style>
table {{
  font-family: arial, sans-serif;
  border-collapse: collapse;
  width: 100%;
}}
td, th {{
  border: 1px solid #dddddd;
  text-align: left;
  padding: 8px;
}}
tr:nth-child(even) {{
  background-color: #dddddd;
}}
</style>
</head>
<body>
<h2>Your query results are ready to download</h2>
<table>
  <tr>
    <th>key</th>
    <th>value</th>
  </tr>
  <tr>
    <td>execution_id</td>
    <td>{execution_id}</td>
  </tr>
  <tr>
    <td>link</td>
    <td>{link}</td>
  </tr>
</table>
</body>
</html>"#,
        execution_id = execution_id,
        link = link.unwrap_or("unavailable"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_carries_execution_id_and_link() {
        let html = results_ready_html("exec-1", Some("https://example.com/signed"));
        assert!(html.contains("exec-1"));
        assert!(html.contains("https://example.com/signed"));
    }

    #[test]
    fn missing_link_renders_placeholder() {
        let html = results_ready_html("exec-1", None);
        assert!(html.contains("unavailable"));
    }
}
