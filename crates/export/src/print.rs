//! Printable document builder.

/// Wrap rendered table markup into a standalone HTML document for the
/// platform print dialog.
pub fn print_document(title: &str, table_markup: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<title>{title}</title>\n<style>\n\
         table {{ border-collapse: collapse; width: 100%; }}\n\
         th, td {{ border: 1px solid #444; padding: 4px 8px; text-align: left; }}\n\
         </style>\n</head>\n<body>\n<h3>{title}</h3>\n{table_markup}\n</body>\n</html>\n"
    )
}
