pub mod mock_responses;
pub mod prompts;
