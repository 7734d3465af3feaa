use shared::domain::Employee;

// Case-insensitive substring match over "first last" display names.
pub fn filter_employees<'a>(employees: &'a [Employee], query: &str) -> Vec<&'a Employee> {
    if query.is_empty() {
        return employees.iter().collect();
    }
    let needle = query.to_lowercase();
    employees
        .iter()
        .filter(|employee| employee.full_name().to_lowercase().contains(&needle))
        .collect()
}
