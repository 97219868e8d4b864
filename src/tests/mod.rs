mod content_cleaning;
mod end_to_end;
mod multiple_json;
mod pipeline_stages;
mod properties;
mod syntax_normalization;
mod tolerant_parsing;
