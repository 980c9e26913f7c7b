//! Named preset snippets for the example menu.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Example {
    pub name: &'static str,
    pub description: &'static str,
    pub source: &'static str,
}

const EXAMPLES: &[Example] = &[
    Example {
        name: "hello",
        description: "Hello World and basic operations",
        source: HELLO,
    },
    Example {
        name: "factorial",
        description: "Recursive factorial function",
        source: FACTORIAL,
    },
    Example {
        name: "fibonacci",
        description: "Fibonacci sequence generation",
        source: FIBONACCI,
    },
    Example {
        name: "calculator",
        description: "Simple calculator with operations",
        source: CALCULATOR,
    },
];

/// Menu order.
pub fn all() -> &'static [Example] {
    EXAMPLES
}

/// Exact-name lookup, for pickers bound to the closed set.
pub fn lookup(name: &str) -> Option<&'static Example> {
    EXAMPLES.iter().find(|e| e.name == name)
}

/// Free-text lookup: surrounding whitespace and case are ignored.
pub fn lookup_ignore_case(name: &str) -> Option<&'static Example> {
    let wanted = name.trim();
    EXAMPLES.iter().find(|e| e.name.eq_ignore_ascii_case(wanted))
}

const HELLO: &str = r#"# Hello World Example
mon greeting = "Hello, Poke! 🎯"
print(greeting)

mon name = "World"
print("Hello, " + name + "!")

# Try some basic math
mon x = 10
mon y = 5
print("10 + 5 = " + print_ret(x + y))"#;

const FACTORIAL: &str = r#"# Factorial Function Example
rotom factorial(n) ->
    if n <= 1 then 1 else n * factorial(n - 1) end

# Test the factorial function
for i = 0 to 6 then
    print("factorial(" + print_ret(i) + ") = " + print_ret(factorial(i)))
end

# Calculate factorial of 10
print("factorial(10) = " + print_ret(factorial(10)))"#;

const FIBONACCI: &str = r#"# Fibonacci Sequence Example
mon fibs = [0, 1]

# Generate first 15 Fibonacci numbers
for i = 2 to 15 then
    mon next = fibs[i-1] + fibs[i-2]
    append(fibs, next)
end

print("First 15 Fibonacci numbers:")
print(fibs)

# Function to get nth Fibonacci number
rotom fib(n)
    if n <= 1 then
        return n
    else
        return fib(n-1) + fib(n-2)
    end
end

print("20th Fibonacci number: " + print_ret(fib(20)))"#;

const CALCULATOR: &str = r#"# Simple Calculator Example
rotom calculator(operation, a, b)
    if operation == "+" then
        return a + b
    elif operation == "-" then
        return a - b
    elif operation == "*" then
        return a * b
    elif operation == "/" then
        if b == 0 then
            return "Error: Division by zero!"
        else
            return a / b
        end
    elif operation == "^" then
        return a ^ b
    elif operation == "%" then
        return a % b
    else
        return "Unknown operation: " + operation
    end
end

# Test the calculator
mon a = 15
mon b = 4

print("Calculator Demo:")
print(print_ret(a) + " + " + print_ret(b) + " = " + print_ret(calculator("+", a, b)))
print(print_ret(a) + " - " + print_ret(b) + " = " + print_ret(calculator("-", a, b)))
print(print_ret(a) + " * " + print_ret(b) + " = " + print_ret(calculator("*", a, b)))
print(print_ret(a) + " / " + print_ret(b) + " = " + print_ret(calculator("/", a, b)))
print(print_ret(a) + " ^ " + print_ret(b) + " = " + print_ret(calculator("^", a, b)))
print(print_ret(a) + " % " + print_ret(b) + " = " + print_ret(calculator("%", a, b)))

# Test error handling
print("Division by zero test: " + print_ret(calculator("/", 10, 0)))"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_lookup_is_case_sensitive() {
        assert_eq!(lookup("hello").map(|e| e.name), Some("hello"));
        assert!(lookup("Hello").is_none());
    }

    #[test]
    fn free_text_lookup_ignores_case_and_padding() {
        assert_eq!(
            lookup_ignore_case("  FiBoNaCcI ").map(|e| e.name),
            Some("fibonacci")
        );
    }

    #[test]
    fn unknown_names_are_not_found() {
        assert!(lookup("quicksort").is_none());
        assert!(lookup_ignore_case("").is_none());
    }

    #[test]
    fn menu_lists_every_example_once() {
        let names: Vec<_> = all().iter().map(|e| e.name).collect();
        assert_eq!(names, ["hello", "factorial", "fibonacci", "calculator"]);
        assert!(all().iter().all(|e| !e.source.trim().is_empty()));
    }
}
