//! Deterministic placeholder content served when no provider can be called.

pub const MOCK_STRUCTURE: &str = r#"{"modules":[{"name":"Introduction","topics":[{"name":"Overview and Basics"},{"name":"Getting Started"}]},{"name":"Core Concepts","topics":[{"name":"Fundamental Principles"},{"name":"Advanced Techniques"}]}]}"#;

pub const MOCK_LECTURE: &str = "# Lecture Notes\n\n## Introduction\n\nThis topic covers the fundamental concepts...\n\n## Key Points\n\n- Point 1\n- Point 2\n- Point 3";

pub const MOCK_TUTORIAL: &str = "# Tutorial Exercise\n\n## Exercise 1\n\nComplete the following tasks:\n\n1. Task 1\n2. Task 2\n3. Task 3";

pub const MOCK_PRACTICAL: &str = "# Practical Exercise\n\n## Hands-on Practice\n\nFollow these steps:\n\n1. Step 1\n2. Step 2\n3. Step 3";

pub const MOCK_QUIZ: &str = r#"{"questions":[{"question":"What is the main concept?","options":["Option A","Option B","Option C","Option D"],"correctAnswer":0},{"question":"Which is correct?","options":["Answer 1","Answer 2","Answer 3","Answer 4"],"correctAnswer":1}]}"#;

pub const MOCK_GENERIC: &str = "Generated content based on your request.";
