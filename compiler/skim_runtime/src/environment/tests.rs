use super::*;
use crate::value::Arity;
use pretty_assertions::assert_eq;
use skim_ir::SymbolTable;

fn symbols(names: &[&str]) -> (SymbolTable, Vec<Symbol>) {
    let mut table = SymbolTable::new();
    let symbols = names.iter().map(|n| table.get_or_add(n).unwrap()).collect();
    (table, symbols)
}

#[test]
fn test_define_lookup() {
    let (_table, syms) = symbols(&["x"]);
    let env = Environment::new();
    env.define(syms[0].clone(), Value::int(42));
    assert_eq!(env.lookup(&syms[0]).unwrap(), Value::int(42));
}

#[test]
fn test_define_overwrites_in_same_frame() {
    let (_table, syms) = symbols(&["x"]);
    let env = Environment::new();
    env.define(syms[0].clone(), Value::int(1));
    env.define(syms[0].clone(), Value::int(2));
    assert_eq!(env.lookup(&syms[0]).unwrap(), Value::int(2));
}

#[test]
fn test_shadowing_hides_outer_binding() {
    let (_table, syms) = symbols(&["x"]);
    let x = &syms[0];

    let outer = Environment::new();
    outer.define(x.clone(), Value::int(1));
    let inner = outer.child();
    inner.define(x.clone(), Value::int(2));

    assert_eq!(inner.lookup(x).unwrap(), Value::int(2));
    assert_eq!(outer.lookup(x).unwrap(), Value::int(1));
}

#[test]
fn test_lookup_walks_outward() {
    let (_table, syms) = symbols(&["x"]);
    let global = Environment::new();
    global.define(syms[0].clone(), Value::int(7));
    let deep = global.child().child().child();

    assert_eq!(deep.lookup(&syms[0]).unwrap(), Value::int(7));
    assert_eq!(deep.depth(), 3);
    assert!(global.is_global());
    assert!(!deep.is_global());
}

#[test]
fn test_unbound_lookup_and_set() {
    let (_table, syms) = symbols(&["y"]);
    let env = Environment::new().child();

    let err = env.lookup(&syms[0]).unwrap_err();
    assert_eq!(err.message, "unbound variable: y");

    let err = env.set(&syms[0], Value::int(1)).unwrap_err();
    assert_eq!(err.message, "unbound variable: y");
    assert!(!env.defines_locally(&syms[0]));
}

#[test]
fn test_set_mutates_nearest_binding() {
    let (_table, syms) = symbols(&["x"]);
    let x = &syms[0];

    let outer = Environment::new();
    outer.define(x.clone(), Value::int(1));
    let inner = outer.child();

    inner.set(x, Value::int(5)).unwrap();
    assert!(!inner.defines_locally(x));
    assert_eq!(outer.lookup(x).unwrap(), Value::int(5));
}

#[test]
fn test_extend_fixed() {
    let (_table, syms) = symbols(&["a", "b"]);
    let global = Environment::new();
    let formals = Formals::Fixed(syms.clone());

    let env = global
        .extend(&formals, vec![Value::int(1), Value::int(2)])
        .unwrap();
    assert_eq!(env.lookup(&syms[0]).unwrap(), Value::int(1));
    assert_eq!(env.lookup(&syms[1]).unwrap(), Value::int(2));
    assert!(!global.defines_locally(&syms[0]));

    let err = global.extend(&formals, vec![Value::int(1)]).unwrap_err();
    assert_eq!(
        err.kind,
        crate::EvalErrorKind::Arity {
            name: String::new(),
            expected: Arity::Exact(2),
            got: 1
        }
    );
}

#[test]
fn test_extend_variadic_collects_rest() {
    let (_table, syms) = symbols(&["a", "rest"]);
    let formals = Formals::Variadic {
        fixed: vec![syms[0].clone()],
        rest: syms[1].clone(),
    };
    let global = Environment::new();

    let env = global
        .extend(&formals, vec![Value::int(1), Value::int(2), Value::int(3)])
        .unwrap();
    assert_eq!(env.lookup(&syms[0]).unwrap(), Value::int(1));
    assert_eq!(
        env.lookup(&syms[1]).unwrap(),
        Value::list([Value::int(2), Value::int(3)])
    );

    let env = global.extend(&formals, vec![Value::int(1)]).unwrap();
    assert_eq!(env.lookup(&syms[1]).unwrap(), Value::Nil);

    assert!(global.extend(&formals, Vec::new()).is_err());
}

#[test]
fn test_bare_symbol_formals_take_everything() {
    let (_table, syms) = symbols(&["args"]);
    let formals = Formals::Variadic {
        fixed: Vec::new(),
        rest: syms[0].clone(),
    };
    let env = Environment::new().extend(&formals, Vec::new()).unwrap();
    assert_eq!(env.lookup(&syms[0]).unwrap(), Value::Nil);
}

#[test]
fn test_clones_share_frame() {
    let (_table, syms) = symbols(&["x"]);
    let env = Environment::new();
    let alias = env.clone();
    alias.define(syms[0].clone(), Value::int(9));

    assert!(env.ptr_eq(&alias));
    assert_eq!(env.lookup(&syms[0]).unwrap(), Value::int(9));
    assert!(!env.ptr_eq(&env.child()));
}
