mod division_test;
mod employee_test;
mod helpers;
mod session_test;
