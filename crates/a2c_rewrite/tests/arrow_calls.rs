//! Transform tests for blocks with arrow-function factories, including
//! implicit-return bodies.

mod common;

use common::assert_transforms;

#[test]
fn transforms_arrow_require_blocks() {
    assert_transforms(
        "
        sap.ui.require(['llamas'], (llama) => {
            llama.doSomeStuff();
        });
        ",
        "
        (() => {
            var llama = require('llamas');
            llama.doSomeStuff();
        })();
        ",
    );
}

#[test]
fn transforms_implicit_return_bodies_into_explicit_returns() {
    assert_transforms(
        "sap.ui.require(['llamas'], (llama) => llama.doSomeStuff());",
        "
        (() => {
            var llama = require('llamas');
            return llama.doSomeStuff();
        })();
        ",
    );
}

#[test]
fn transforms_implicit_return_with_multiple_dependencies() {
    assert_transforms(
        "sap.ui.require(['llamas', 'frogs'], (llama, frog) => llama.doSomeStuff(frog));",
        "
        (() => {
            var llama = require('llamas');
            var frog = require('frogs');
            return llama.doSomeStuff(frog);
        })();
        ",
    );
}

#[test]
fn transforms_arrow_blocks_with_unused_dependencies() {
    assert_transforms(
        "
        sap.ui.require(['llamas', 'frogs'], (llama) => {
            llama.doSomeStuff();
        });
        ",
        "
        (() => {
            var llama = require('llamas');
            require('frogs');
            llama.doSomeStuff();
        })();
        ",
    );
}

#[test]
fn transforms_nested_arrow_require_blocks() {
    assert_transforms(
        "
        sap.ui.require(['here', 'is', 'i'], (here) => {
            here.doStuff();
            sap.ui.require(['yep', 'that', 'me'], (yep) => {
                yep.doStuff();
            });
        });
        ",
        "
        (() => {
            var here = require('here');
            require('is');
            require('i');
            here.doStuff();
            (() => {
                var yep = require('yep');
                require('that');
                require('me');
                yep.doStuff();
            })();
        })();
        ",
    );
}

#[test]
fn transforms_define_blocks_with_arrow_factories() {
    assert_transforms(
        "
        sap.ui.define(['here', 'is', 'i'], (here) => {
            here.doStuff();
        });
        ",
        "
        module.exports = (() => {
            var here = require('here');
            require('is');
            require('i');
            here.doStuff();
        })();
        ",
    );
}

#[test]
fn transforms_arrow_factories_with_rest_parameters() {
    assert_transforms(
        "
        sap.ui.require(['dep1', 'dep2', 'module', 'exports', 'require'], (dep, ...rest) => {
            dep.doStuff();
        });
        ",
        "
        (() => {
            var dep = require('dep1');
            var rest = [require('dep2'), module, exports, require];
            dep.doStuff();
        })();
        ",
    );
}

#[test]
fn preserves_async_arrow_factories() {
    assert_transforms(
        "
        sap.ui.require(['llamas'], async (llama) => {
            await llama.doSomeStuff();
        });
        ",
        "
        (async () => {
            var llama = require('llamas');
            await llama.doSomeStuff();
        })();
        ",
    );
}

#[test]
fn arrow_marker_exemption_is_idempotent() {
    let program = "
        // transform-amd-to-commonjs-ignore
        sap.ui.require(['llamas', 'frogs'], (llama, frog) => {
            llama.doSomeStuff();
            frog.sayRibbit();
        });
    ";
    assert_transforms(program, program);
}
