/// Constants used throughout the vcapenv codebase
// Environment variable names
pub const VCAP_SERVICES_VAR: &str = "VCAP_SERVICES";
pub const VCAPENV_PROPERTIES_VAR: &str = "VCAPENV_PROPERTIES";
pub const VCAPENV_LOG_VAR: &str = "VCAPENV_LOG";

// Placeholder tokens: ${KEY} or ${KEY,default}
pub const PLACEHOLDER_START: &str = "${";
pub const PLACEHOLDER_END: char = '}';
pub const PLACEHOLDER_DEFAULT_SEPARATOR: char = ',';

// Selector grammar: ["!"] ( "/" regex "/" | literal )
pub const SELECTOR_NEGATION: char = '!';
pub const SELECTOR_REGEX_DELIMITER: char = '/';

// Connection URIs
pub const SCHEME_DELIMITER: &str = "://";
