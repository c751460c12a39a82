use crate::model::{GenericParameter, TypeRef};

/// Render a type usage: its name followed by its generic arguments, if any.
///
/// ```rust
/// use dotbrowse::declaration::type_usage;
/// use dotbrowse::model::TypeRef;
///
/// let dict = TypeRef::class("Dictionary`2", Some("System.Collections.Generic")).with_args(vec![
///     TypeRef::class("String", Some("System")),
///     TypeRef::class("List`1", Some("System.Collections.Generic"))
///         .with_args(vec![TypeRef::primitive("Int32")]),
/// ]);
/// assert_eq!(type_usage(&dict), "Dictionary`2<String, List`1<Int32>>");
/// ```
#[must_use]
pub fn type_usage(ty: &TypeRef) -> String {
    format!("{}{}", ty.name, generic_arguments(&ty.generic_args))
}

/// Render bound generic arguments as `<A, B<C, D>>`, expanding nested instantiations.
///
/// Returns an empty string for an empty list.
#[must_use]
pub fn generic_arguments(args: &[TypeRef]) -> String {
    if args.is_empty() {
        return String::new();
    }

    let rendered: Vec<String> = args.iter().map(type_usage).collect();
    format!("<{}>", rendered.join(", "))
}

/// Render the constraint group of one parameter, e.g. `T: IComparable`1, class, new()`.
///
/// Type constraints come first, then `class`, `notnull` and `new()`. Returns `None`
/// for an unconstrained parameter.
#[must_use]
pub fn parameter_constraints(param: &GenericParameter) -> Option<String> {
    let mut constraints: Vec<&str> = param
        .constraints
        .iter()
        .map(|constraint| constraint.name.as_str())
        .collect();

    if param.reference_type {
        constraints.push("class");
    }
    if param.not_nullable_value_type {
        constraints.push("notnull");
    }
    if param.default_constructor {
        constraints.push("new()");
    }

    if constraints.is_empty() {
        None
    } else {
        Some(format!("{}: {}", param.name, constraints.join(", ")))
    }
}

/// Render declared generic parameters as `<T1, T2>` plus their `where` clause.
///
/// The clause carries a leading space and joins the groups of different parameters
/// with a bare `,`: ` where T1: class,T2: new()`. Both parts are empty when `params`
/// is empty; the clause is empty when nothing is constrained.
#[must_use]
pub fn generic_parameter_list(params: &[GenericParameter]) -> (String, String) {
    if params.is_empty() {
        return (String::new(), String::new());
    }

    let names: Vec<&str> = params.iter().map(|param| param.name.as_str()).collect();
    let groups: Vec<String> = params.iter().filter_map(parameter_constraints).collect();

    let clause = if groups.is_empty() {
        String::new()
    } else {
        format!(" where {}", groups.join(","))
    };

    (format!("<{}>", names.join(", ")), clause)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn constrained(name: &str) -> GenericParameter {
        let mut param = GenericParameter::new(name);
        param.reference_type = true;
        param.default_constructor = true;
        param
    }

    #[test]
    fn usages() {
        assert_eq!(type_usage(&TypeRef::primitive("Int32")), "Int32");
        assert_eq!(type_usage(&TypeRef::generic_parameter("T")), "T");
        assert_eq!(generic_arguments(&[]), "");

        let nested = TypeRef::class("Func`2", Some("System")).with_args(vec![
            TypeRef::generic_parameter("T"),
            TypeRef::class("IEnumerable`1", Some("System.Collections.Generic"))
                .with_args(vec![TypeRef::class("String", Some("System"))]),
        ]);
        assert_eq!(type_usage(&nested), "Func`2<T, IEnumerable`1<String>>");
    }

    #[test]
    fn constraint_order() {
        let mut param = GenericParameter::new("T");
        param.default_constructor = true;
        param.not_nullable_value_type = true;
        param.reference_type = true;
        param
            .constraints
            .push(TypeRef::class("IComparable`1", Some("System")).with_args(vec![TypeRef::generic_parameter("T")]));

        assert_eq!(
            parameter_constraints(&param).unwrap(),
            "T: IComparable`1, class, notnull, new()"
        );
        assert_eq!(parameter_constraints(&GenericParameter::new("U")), None);
    }

    #[test]
    fn parameter_lists() {
        assert_eq!(generic_parameter_list(&[]), (String::new(), String::new()));

        let (args, clause) =
            generic_parameter_list(&[GenericParameter::new("TKey"), GenericParameter::new("TValue")]);
        assert_eq!(args, "<TKey, TValue>");
        assert_eq!(clause, "");

        let (args, clause) = generic_parameter_list(&[
            constrained("T1"),
            GenericParameter::new("T2"),
            constrained("T3"),
        ]);
        assert_eq!(args, "<T1, T2, T3>");
        assert_eq!(clause, " where T1: class, new(),T3: class, new()");
    }
}
